//! Layout components - page shell, hero header, escaping

use super::search::search_input;

/// Escapes text for use in HTML content and quoted attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders the complete HTML document around `content`.
///
/// Loads Tailwind and HTMX from their CDNs plus the local stylesheet.
pub fn page_shell(title: &str, content: &str) -> String {
    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>{title}</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="icon" type="image/svg+xml" href="/static/logo.svg">
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="bg-primary min-h-screen font-sans">
    <main>
        <div class="pattern"></div>
        <div class="wrapper">
            {content}
        </div>
    </main>
</body>
</html>"#
    )
}

/// Renders the hero banner with the headline and search input.
pub fn hero(search_term: &str) -> String {
    format!(
        r#"<header class="sm:mt-10 mt-5">
            <img src="/static/hero.svg" alt="Hero Banner" class="w-full max-w-lg h-auto object-contain mx-auto drop-shadow-md">
            <h1 class="mx-auto max-w-4xl text-center text-5xl font-bold leading-tight tracking-[-1%] text-white sm:text-[64px] sm:leading-[76px]">
                Find <span class="text-gradient">Movies</span> You'll Enjoy Without the Hassle
            </h1>
            {}
        </header>"#,
        search_input(search_term)
    )
}
