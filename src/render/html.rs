//! Self-contained HTML page for one pedigree (tree markup plus the laid-out
//! data embedded as JSON).

use super::tree::PedigreeBox;

/// Render a standalone pedigree page.
///
/// Important: we avoid `format!()` because the CSS and the embedded JSON both
/// contain `{}`, which would conflict with Rust formatting; placeholders are
/// substituted with `.replace()` instead.
pub fn render_pedigree_page(title: &str, root: Option<&PedigreeBox>) -> anyhow::Result<String> {
    let json = serde_json::to_string(&root)?; // embedded as a JS object literal

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__ - Pedigree</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; background: #f4f7f6; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; background: white; }
  h1 { margin: 0; font-size: 20px; }
  .page { padding: 16px; }
  .node { border: 1px solid #ddd; border-radius: 6px; padding: 8px; background: white; box-shadow: 0 1px 2px rgba(0,0,0,0.05); }
  .name { font-weight: 600; }
  .parents { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; margin-top: 8px; }
  .muted { color: #777; }
</style>
</head>
<body>
<header><h1>__TITLE__</h1></header>
<div class="page">__TREE__</div>
<script>
// Laid-out pedigree data (JSON object literal), for anything downstream that
// wants to post-process the page.
const PEDIGREE = __DATA__;
</script>
</body>
</html>
"#;

    let tree = match root {
        Some(b) => render_box(b),
        None => r#"<p class="muted">No pedigree data.</p>"#.to_string(),
    };

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(title))
        .replace("__TREE__", &tree)
        .replace("__DATA__", &json))
}

/// Nested box markup: the node's name, then a two-column sire/dam grid when
/// either slot is filled.
fn render_box(node: &PedigreeBox) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="node"><div class="name">"#);
    html.push_str(&escape_html(&node.label));
    html.push_str("</div>");

    if node.sire.is_some() || node.dam.is_some() {
        html.push_str(r#"<div class="parents"><div class="slot">"#);
        if let Some(sire) = &node.sire {
            html.push_str(&render_box(sire));
        }
        html.push_str(r#"</div><div class="slot">"#);
        if let Some(dam) = &node.dam {
            html.push_str(&render_box(dam));
        }
        html.push_str("</div></div>");
    }

    html.push_str("</div>");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn boxed(label: &str, sire: Option<PedigreeBox>, dam: Option<PedigreeBox>) -> PedigreeBox {
        PedigreeBox {
            label: label.to_string(),
            sire: sire.map(Box::new),
            dam: dam.map(Box::new),
        }
    }

    #[test]
    fn escapes_markup_in_names() {
        assert_eq!(escape_html(r#"<Rex> & "Co""#), "&lt;Rex&gt; &amp; &quot;Co&quot;");
    }

    #[test]
    fn page_without_data_shows_placeholder() {
        let html = render_pedigree_page("Rex", None).unwrap();
        assert!(html.contains("No pedigree data."));
        assert!(html.contains("<title>Rex - Pedigree</title>"));
    }

    #[test]
    fn nested_boxes_keep_both_slots() {
        let tree = boxed("Rex", Some(boxed("Max", None, None)), None);
        let markup = render_box(&tree);
        // One parents grid with the sire filled and the dam slot left empty.
        assert_eq!(markup.matches(r#"<div class="slot">"#).count(), 2);
        assert!(markup.contains("Max"));
    }
}
