pub(super) const SUCCESS_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Spotuify - Authorization Successful</title>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            background: #191414;
            color: #1DB954;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            text-align: center;
        }
        p {
            color: #B3B3B3;
        }
    </style>
</head>
<body>
    <div>
        <h1>Authorization Successful!</h1>
        <p>You can close this window and return to Spotuify.</p>
    </div>
</body>
</html>"#;

const ERROR_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Spotuify - Authorization Failed</title>
    <style>
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            background: #191414;
            color: #ff4444;
            display: flex;
            justify-content: center;
            align-items: center;
            height: 100vh;
            text-align: center;
        }
        code {
            color: #FFFFFF;
        }
        p {
            color: #B3B3B3;
        }
    </style>
</head>
<body>
    <div>
        <h1>Authorization Failed</h1>
        <p>Error: <code>{ERROR}</code></p>
        <p>Please return to your terminal and try again.</p>
    </div>
</body>
</html>"#;

pub(super) fn error_page(reason: &str) -> String {
    ERROR_HTML_TEMPLATE.replace("{ERROR}", &escape_html(reason))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
