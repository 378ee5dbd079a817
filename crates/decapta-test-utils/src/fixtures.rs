//! Sample sources shared by the test suites.

/// Two rows; `data` is a reserved column name.
pub const PEOPLE_CSV: &str = "name,data\nAlice,x\nBob,y\n";

/// One column of each inferred widget kind.
pub const POSTS_CSV: &str = "\
slug,title,published,date,views,body
hello,Hello,true,2024-01-31,10,\"first line
second line\"
world,World,no,2024-02-01,2.5,short
";

/// English bundle with placeholder metadata and a bundle attribute.
pub const APP_EN_ARB: &str = r#"{
  "@@locale": "en",
  "greeting": "Hello {user}",
  "@greeting": {
    "description": "Greets the user",
    "placeholders": {
      "user": {
        "type": "String",
        "example": "Bob"
      }
    }
  },
  "farewell": "Bye"
}
"#;

/// German bundle without metadata.
pub const APP_DE_ARB: &str = r#"{
  "greeting": "Hallo {user}",
  "farewell": "Tschüss"
}
"#;

/// Hand-edited configuration with comments and a customized collection.
pub const EDITED_CONFIG: &str = r#"# site configuration
backend:
  name: git-gateway # keep
  branch: main

media_folder: static/uploads

collections:
  # people are maintained by hand too
  - name: people
    label: Team # renamed by editor
    folder: content/people/
    fields:
      - {label: Name, name: name, widget: string}
"#;
