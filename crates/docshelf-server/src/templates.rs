//! HTML page templates.
//!
//! Pages are assembled from const template strings with `{{NAME}}`
//! placeholders. All dynamic text is HTML-escaped before interpolation,
//! and document names are percent-encoded wherever they appear in a URL.

/// Escape a string for interpolation into HTML text or attributes.
#[must_use]
pub fn html_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the shared page shell around a body fragment.
///
/// The flash message, when present, renders once at the top of the page;
/// the nav reflects the session's signed-in state.
#[must_use]
pub fn page(title: &str, flash: Option<&str>, username: Option<&str>, body: &str) -> String {
    let flash_html = flash.map_or_else(String::new, |message| {
        format!("<p class=\"flash\">{}</p>", html_escape(message))
    });

    let nav = username.map_or_else(
        || "<a href=\"/signin\">Sign In</a>".to_owned(),
        |user| {
            format!(
                "<span class=\"user\">{}</span> \
                 <a href=\"/new\">New Document</a> \
                 <form class=\"inline\" method=\"post\" action=\"/signout\">\
                 <button type=\"submit\">Sign Out</button></form>",
                html_escape(user)
            )
        },
    );

    PAGE_SHELL
        .replace("{{TITLE}}", &html_escape(title))
        .replace("{{NAV}}", &nav)
        .replace("{{FLASH}}", &flash_html)
        .replace("{{BODY}}", body)
}

/// Body fragment for the index page: one list item per document.
#[must_use]
pub fn index_body(names: &[String]) -> String {
    let mut items = String::new();
    for name in names {
        let text = html_escape(name);
        let href = urlencoding::encode(name);
        items.push_str(&format!(
            "<li><a href=\"/{href}\">{text}</a> \
             <a class=\"edit\" href=\"/{href}/edit\">edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/destroy/{href}\">\
             <button type=\"submit\">delete</button></form></li>\n"
        ));
    }

    INDEX_BODY.replace("{{ITEMS}}", &items)
}

/// Body fragment for the new-document form.
#[must_use]
pub fn new_body() -> String {
    NEW_BODY.to_owned()
}

/// Body fragment for the edit form, pre-filled with the document's
/// rendered content.
#[must_use]
pub fn edit_body(name: &str, content: &str) -> String {
    EDIT_BODY
        .replace("{{NAME}}", &html_escape(name))
        .replace("{{ACTION}}", &format!("/{}/edit", urlencoding::encode(name)))
        .replace("{{CONTENT}}", &html_escape(content))
}

/// Body fragment for the sign-in form.
#[must_use]
pub fn signin_body() -> String {
    SIGNIN_BODY.to_owned()
}

const PAGE_SHELL: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/><meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>{{TITLE}} &mdash; Docshelf</title>
<style>
body{font-family:-apple-system,system-ui,sans-serif;max-width:680px;margin:0 auto;padding:24px;line-height:1.6;color:#222}
nav{display:flex;justify-content:space-between;align-items:center;border-bottom:1px solid #ddd;padding-bottom:12px;margin-bottom:16px}
nav .links{display:flex;gap:12px;align-items:center}
.flash{background:#fdf3d0;border:1px solid #e8d48a;border-radius:6px;padding:8px 12px}
ul.docs{list-style:none;padding:0}
ul.docs li{display:flex;gap:10px;align-items:center;padding:6px 0}
ul.docs a.edit{font-size:13px;color:#666}
form.inline{display:inline;margin:0}
form.inline button{background:none;border:none;color:#a33;cursor:pointer;font-size:13px;padding:0}
label{display:block;margin:12px 0 4px}
input[type=text],input[type=password]{width:100%;padding:6px;box-sizing:border-box}
textarea{width:100%;min-height:280px;padding:8px;box-sizing:border-box;font-family:ui-monospace,monospace}
button[type=submit].primary{margin-top:12px;padding:8px 20px;cursor:pointer}
</style></head>
<body>
<nav><a class="brand" href="/">Docshelf</a><div class="links">{{NAV}}</div></nav>
{{FLASH}}
{{BODY}}
</body></html>
"##;

const INDEX_BODY: &str = r##"<h1>Documents</h1>
<ul class="docs">
{{ITEMS}}</ul>
"##;

const NEW_BODY: &str = r##"<h1>Add a new document</h1>
<form method="post" action="/create">
  <label for="new_file">Document name</label>
  <input type="text" id="new_file" name="new_file" autofocus/>
  <button type="submit" class="primary">Create</button>
</form>
"##;

const EDIT_BODY: &str = r##"<h1>Edit {{NAME}}</h1>
<form method="post" action="{{ACTION}}">
  <textarea name="content">{{CONTENT}}</textarea>
  <button type="submit" class="primary">Save Changes</button>
</form>
"##;

const SIGNIN_BODY: &str = r##"<h1>Sign In</h1>
<form method="post" action="/signin">
  <label for="username">Username</label>
  <input type="text" id="username" name="username" autofocus/>
  <label for="password">Password</label>
  <input type="password" id="password" name="password"/>
  <button type="submit" class="primary">Sign In</button>
</form>
"##;
