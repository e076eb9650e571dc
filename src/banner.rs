//! Startup banner

const WIDTH: usize = 50;

/// Center `text` in a field of `width` columns, left-biased like `padStart`
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let left = width.saturating_sub(len) / 2;
    format!("{:left$}{:<rest$}", "", text, left = left, rest = width - left)
}

/// Banner lines printed when the bot starts
pub fn banner(title: &str, subtitle: &str) -> Vec<String> {
    let line = "=".repeat(WIDTH);
    vec![
        line.clone(),
        center(title, WIDTH),
        center(subtitle, WIDTH),
        line,
    ]
}
