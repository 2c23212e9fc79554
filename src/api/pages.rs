//! Server-rendered HTML for the three views.

use crate::db::UserSummary;

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
</head><body>
{body}
</body></html>"#
    )
}

fn credentials_form(title: &str, action: &str, error: Option<&str>, footer: &str) -> String {
    let error_html = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();

    layout(
        title,
        &format!(
            r#"<h1>{title}</h1>
{error_html}
<form method="POST" action="{action}">
  <label>Username <input type="text" name="username" autocomplete="username"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">{title}</button>
</form>
{footer}"#
        ),
    )
}

pub fn register_page(error: Option<&str>) -> String {
    credentials_form(
        "Register",
        "/register",
        error,
        r#"<p>Already registered? <a href="/login">Login</a></p>"#,
    )
}

pub fn login_page(error: Option<&str>) -> String {
    credentials_form(
        "Login",
        "/login",
        error,
        r#"<p>No account? <a href="/register">Register</a></p>"#,
    )
}

pub fn admin_page(current_user: &str, users: &[UserSummary]) -> String {
    let rows: String = users
        .iter()
        .map(|u| {
            format!(
                "  <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                u.id,
                escape(&u.username),
                u.is_admin
            )
        })
        .collect();

    layout(
        "Admin",
        &format!(
            r#"<h1>Admin</h1>
<p>Logged in as <strong>{user}</strong> (<a href="/logout">Logout</a>)</p>
<table>
  <tr><th>ID</th><th>Username</th><th>Admin</th></tr>
{rows}</table>"#,
            user = escape(current_user),
        ),
    )
}
