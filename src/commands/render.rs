//! Plain-text rendering of command results.

use crate::app::UserDto;
use crate::infra::DatabaseConfig;

const USER_HEADERS: [&str; 5] = ["uuid", "first_name", "last_name", "email", "password"];

/// Fixed-width table with a header row and a dashed rule.
pub fn users_table(users: &[UserDto]) -> String {
    let rows: Vec<[&str; 5]> = users
        .iter()
        .map(|u| {
            [
                u.id.as_str(),
                u.first_name.as_str(),
                u.last_name.as_str(),
                u.email.as_str(),
                u.password.as_str(),
            ]
        })
        .collect();

    let mut widths = USER_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &USER_HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let cell = cell.as_ref();
            let pad = w - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn database_config(config: &DatabaseConfig, show_password: bool) -> String {
    let password = if show_password {
        config.password.clone()
    } else {
        "*".repeat(8)
    };
    format!(
        "host: {}\nport: {}\nusername: {}\npassword: {}\nengine: {}\n",
        config.host, config.port, config.username, password, config.engine
    )
}
