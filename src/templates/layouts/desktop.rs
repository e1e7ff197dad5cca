use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; background: #f8fafc; }
header { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 1.5rem; background: #fff; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
header h3 { margin: 0; flex: 1; }
main { display: grid; grid-template-columns: 18rem 1fr; gap: 1rem; padding: 1rem 1.5rem; }
.card { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 2px rgba(0,0,0,.06); margin-bottom: 1rem; }
.card h2 { font-size: 1.05rem; margin: 0 0 0.75rem; }
fieldset { border: 1px solid #e5e7eb; border-radius: 6px; margin-bottom: 0.75rem; }
fieldset label { display: block; font-size: 0.9rem; }
.quick { font-size: 0.8rem; margin-bottom: 0.25rem; }
.quick a { margin-right: 0.5rem; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(9rem, 1fr)); gap: 0.5rem; }
.stat strong { display: block; font-size: 1.2rem; }
.badge { background: #524ed2; color: #fff; border-radius: 999px; padding: 0.1rem 0.6rem; font-size: 0.8rem; }
table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
th, td { padding: 0.35rem 0.5rem; border-bottom: 1px solid #e5e7eb; text-align: right; }
th:first-child, td:first-child, th:nth-child(2), td:nth-child(2) { text-align: left; }
th a { color: inherit; text-decoration: none; }
.charts { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; }
.bar-price { fill: #524ed2; }
.bar-ppa { fill: #10b981; }
.placeholder, .no-results { padding: 2rem; text-align: center; color: #6b7280; border: 1px dashed #d1d5db; border-radius: 6px; }
.disabled { opacity: 0.45; pointer-events: none; }
.error { color: #dc2626; }
.cards { display: none; }
.complex-card { border: 1px solid #e5e7eb; border-radius: 6px; padding: 0.6rem; margin-bottom: 0.5rem; }
.complex-card dl { display: grid; grid-template-columns: auto 1fr; gap: 0.1rem 0.75rem; margin: 0.4rem 0 0; font-size: 0.85rem; }
@media (max-width: 800px) {
  main { grid-template-columns: 1fr; }
  .charts { grid-template-columns: 1fr; }
  .table-wrap { display: none; }
  .cards { display: block; }
}
"#;

/// Page shell. `refresh_secs` makes the page reload itself.
pub fn desktop_layout(title: &str, refresh_secs: Option<u32>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(secs) = refresh_secs {
                    meta http-equiv="refresh" content=(secs);
                }
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M3 21h18" {}
                        path d="M5 21v-14l8 -4v18" {}
                        path d="M19 21v-10l-6 -4" {}
                    }
                    h3 { "Sejong Apartment Complexes" }
                    nav {
                        a href="/" { "Reset" }
                        " · "
                        a href="/classified.json" { "Data" }
                    }
                }
                (content)
            }
        }
    }
}
