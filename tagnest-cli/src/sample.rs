//! Built-in sample document for `--sample`.

/// A small, correctly nested page.
///
/// The doctype is not a tag marker and is skipped by the tokenizer.
pub const SAMPLE_DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Sample Page</title>
</head>
<body>
    <div class="container">
        <h1>Welcome</h1>
        <p>This is a <strong>sample</strong> HTML page.</p>
        <ul>
            <li>Item 1</li>
            <li>Item 2</li>
        </ul>
    </div>
</body>
</html>"#;
