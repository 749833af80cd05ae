//! One-page HTML report.
//!
//! Every interpolated value goes through [`html_escape`]; the page shows
//! either the error message or the full result, never a mix of both.

use crate::cycle::Outcome;
use congestion_core::Error;

const STYLE: &str = "body{font-family:system-ui;margin:2rem}\
code{background:#f6f6f6;padding:.15rem .35rem;border-radius:.25rem}\
.card{border:1px solid #e5e5e5;border-radius:.5rem;padding:1rem;max-width:680px}";

pub fn render_page(result: &Result<Outcome, Error>, log_name: &str) -> String {
    let body = match result {
        Err(e) => format!(
            "<p style=\"color:#c00\"><strong>Error:</strong> {}</p>",
            html_escape(&e.to_string())
        ),
        Ok(outcome) => render_card(outcome, log_name),
    };

    format!(
        "<!doctype html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Vigo — Ruta más lenta</title>\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <style>{STYLE}</style>\n</head>\n<body>\n<h1>Vigo — Ruta más lenta</h1>\n{body}\n</body>\n</html>\n"
    )
}

fn render_card(outcome: &Outcome, log_name: &str) -> String {
    let d = &outcome.report.display;
    format!(
        "<div class=\"card\">\n<h2>Resultado</h2>\n<p><strong>Ruta más lenta:</strong></p>\n<ul>\n\
         <li><strong>ID:</strong> {}</li>\n\
         <li><strong>Nombre:</strong> {}</li>\n\
         <li><strong>Métrica:</strong> {}</li>\n\
         </ul>\n<p><em>Registrado en</em> <code>{}</code>: {}</p>\n</div>",
        html_escape(&d.id),
        html_escape(&d.name),
        html_escape(&d.metric_clause),
        html_escape(log_name),
        html_escape(&outcome.report.log_line),
    )
}

pub fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use congestion_core::analyze;
    use serde_json::json;

    fn outcome(doc: serde_json::Value) -> Outcome {
        let report = analyze(&doc).unwrap();
        Outcome {
            entry: format!("[2025-01-01T00:00:00+01:00] {}", report.log_line),
            report,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(html_escape("Rúa"), "Rúa");
    }

    #[test]
    fn success_page_shows_all_fields() {
        let page = render_page(
            &Ok(outcome(json!([{"id": 2, "name": "B", "avg_speed": 12}]))),
            "log.txt",
        );
        assert!(page.starts_with("<!doctype html>"));
        assert!(page.contains("<li><strong>ID:</strong> 2</li>"));
        assert!(page.contains("<li><strong>Nombre:</strong> B</li>"));
        assert!(page.contains("velocidad = 12 (menor es más lenta)"));
        assert!(page.contains("<code>log.txt</code>: id=2 | name=B | speed=12"));
        assert!(!page.contains("Error:"));
    }

    #[test]
    fn duration_page_uses_duration_clause() {
        let page = render_page(
            &Ok(outcome(json!([{"id": "y", "ruta": "Bar", "duration": 90}]))),
            "log.txt",
        );
        assert!(page.contains("duración = 90 (mayor es más lenta)"));
    }

    #[test]
    fn hostile_names_are_escaped() {
        let page = render_page(
            &Ok(outcome(json!([{"id": "<b>", "name": "<script>alert(1)</script>", "speed": 1}]))),
            "log.txt",
        );
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("id=&lt;b&gt; | name=&lt;script&gt;"));
    }

    #[test]
    fn error_page_shows_only_the_message() {
        let page = render_page(&Err(Error::NoRecordsFound), "log.txt");
        assert!(page.contains(
            "<strong>Error:</strong> No se encontraron registros en la respuesta de la API."
        ));
        assert!(!page.contains("class=\"card\""));
    }

    #[test]
    fn error_messages_are_escaped() {
        let page = render_page(&Err(Error::Fetch("HTTP 500 al llamar a http://x/?a=1&b=<2>".into())), "log.txt");
        assert!(page.contains("http://x/?a=1&amp;b=&lt;2&gt;"));
    }
}
