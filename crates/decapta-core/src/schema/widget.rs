//! Widget inference from sample values

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Decap widget names used by generated fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    String,
    Text,
    Markdown,
    Boolean,
    Datetime,
    Number,
    Object,
}

impl Widget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Number => "number",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d"];

pub fn is_boolean(value: &str) -> bool {
    ["true", "false", "yes", "no"]
        .iter()
        .any(|b| value.eq_ignore_ascii_case(b))
}

pub fn is_date(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
}

/// Pick the widget for a column from all of its values.
///
/// Precedence: any multi-line value makes it `markdown`; otherwise the
/// first of `boolean`, `datetime`, `number` that every value satisfies;
/// otherwise `string`. A column without values is `string`.
pub fn infer_widget<'a>(samples: impl IntoIterator<Item = &'a str>) -> Widget {
    let mut seen = false;
    let mut multiline = false;
    let (mut boolean, mut date, mut number) = (true, true, true);

    for value in samples {
        seen = true;
        multiline |= value.contains('\n');
        boolean &= is_boolean(value);
        date &= is_date(value);
        number &= value.parse::<f64>().is_ok();
    }

    if !seen {
        Widget::String
    } else if multiline {
        Widget::Markdown
    } else if boolean {
        Widget::Boolean
    } else if date {
        Widget::Datetime
    } else if number {
        Widget::Number
    } else {
        Widget::String
    }
}
