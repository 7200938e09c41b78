//! Server-rendered HTML views.
//!
//! Each page is the shared shell plus a body fragment; all interpolated
//! values go through the escape helpers.

use crate::utils::{escape_attr, escape_html};

/// Render the page shell around a body fragment
pub fn page(title: &str, message: Option<&str>, user: Option<&str>, body: &str) -> String {
    let message_html = match message {
        Some(text) => format!("<p id=\"message\">{}</p>", escape_html(text)),
        None => String::new(),
    };

    let auth_html = match user {
        Some(name) => format!(
            "<p class=\"signed-in\">Signed in as {}</p>\
             <form class=\"inline\" method=\"post\" action=\"/sign_out\">\
             <button type=\"submit\">Sign Out</button></form>",
            escape_html(name)
        ),
        None => "<a href=\"/sign_in\">Sign In</a> <a href=\"/sign_up\">Sign Up</a>".to_string(),
    };

    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title></head><body>\
         <header class=\"topbar\">{}</header>{}\
         <main class=\"content\">{}</main>\
         </body></html>",
        escape_html(title),
        auth_html,
        message_html,
        body
    )
}

/// Document listing for the home page
pub fn index_page(
    entries: &[(String, Option<String>)],
    message: Option<&str>,
    user: Option<&str>,
) -> String {
    let mut body = String::from("<h1>Documents</h1>\n<ul class=\"listing\">\n");
    for (name, modified) in entries {
        let meta = match modified {
            Some(stamp) => format!(" <span class=\"meta\">{}</span>", escape_html(stamp)),
            None => String::new(),
        };
        body.push_str(&format!(
            "  <li><a href=\"/{name}\">{display}</a> \
             <a class=\"edit\" href=\"/{name}/edit\">edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/{name}/delete\">\
             <button type=\"submit\">delete</button></form>{meta}</li>\n",
            name = escape_attr(name),
            display = escape_html(name),
            meta = meta,
        ));
    }
    body.push_str("</ul>\n<p><a href=\"/new\">New Document</a></p>");
    page("Documents", message, user, &body)
}

/// A rendered markdown document
pub fn document_page(name: &str, rendered: &str, message: Option<&str>, user: Option<&str>) -> String {
    let body = format!("<article class=\"document\">{}</article>", rendered);
    page(name, message, user, &body)
}

/// Form for creating a new document
pub fn new_document_page(message: Option<&str>, user: Option<&str>) -> String {
    let body = "<h1>Add a new document:</h1>\
                <form method=\"post\" action=\"/new\">\
                <input type=\"text\" name=\"new_file\" autofocus>\
                <button type=\"submit\">Create</button></form>"
        .to_string();
    page("New Document", message, user, &body)
}

/// Form for editing a document's content
pub fn edit_page(name: &str, content: &str, message: Option<&str>, user: Option<&str>) -> String {
    let body = format!(
        "<h1>Edit content of {display}:</h1>\
         <form method=\"post\" action=\"/{name}/edit\">\
         <textarea name=\"content\" rows=\"20\" cols=\"80\">{content}</textarea>\
         <button type=\"submit\">Save Changes</button></form>",
        display = escape_html(name),
        name = escape_attr(name),
        content = escape_html(content),
    );
    page(&format!("Edit {}", name), message, user, &body)
}

/// Sign-in form
pub fn sign_in_page(message: Option<&str>, user: Option<&str>) -> String {
    let body = "<h1>Sign In</h1>\
                <form method=\"post\" action=\"/sign_in\">\
                <label>Username: <input type=\"text\" name=\"user\"></label>\
                <label>Password: <input type=\"password\" name=\"pass\"></label>\
                <button type=\"submit\">Sign In</button></form>"
        .to_string();
    page("Sign In", message, user, &body)
}

/// Sign-up form
pub fn sign_up_page(message: Option<&str>, user: Option<&str>) -> String {
    let body = "<h1>Sign Up</h1>\
                <form method=\"post\" action=\"/sign_up\">\
                <label>Username: <input type=\"text\" name=\"user\"></label>\
                <label>Password: <input type=\"password\" name=\"pass\"></label>\
                <button type=\"submit\">Sign Up</button></form>"
        .to_string();
    page("Sign Up", message, user, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_links_each_document() {
        let entries = vec![("history.txt".to_string(), None)];
        let html = index_page(&entries, None, None);
        assert!(html.contains("<a href=\"/history.txt\">history.txt</a>"));
        assert!(html.contains("action=\"/history.txt/delete\""));
    }

    #[test]
    fn message_is_shown_when_present() {
        let html = index_page(&[], Some("x.txt was created"), None);
        assert!(html.contains("<p id=\"message\">x.txt was created</p>"));

        let html = index_page(&[], None, None);
        assert!(!html.contains("id=\"message\""));
    }

    #[test]
    fn shell_shows_signed_in_user() {
        let html = page("t", None, Some("admin"), "");
        assert!(html.contains("Signed in as admin"));
        assert!(html.contains("action=\"/sign_out\""));

        let html = page("t", None, None, "");
        assert!(html.contains("href=\"/sign_in\""));
    }

    #[test]
    fn edit_page_escapes_content() {
        let html = edit_page("a.txt", "<script>", None, Some("admin"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<textarea"));
    }
}
