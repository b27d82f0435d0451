use crate::extract::{self, PageFormat, html};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_text_is_collapsed() {
        let page = "<html><body><span>Hello,</span>   <b>world</b>!</body></html>";
        assert_eq!(html::visible_text(page), "Hello, world!");
    }

    #[test]
    fn test_hidden_elements_are_skipped() {
        let page = "<html><head><title>T</title></head><body>\
                    <script>var x = 1;</script><style>p {}</style><div>Shown</div></body></html>";
        assert_eq!(html::visible_text(page), "Shown");
    }

    #[test]
    fn test_blocks_and_paragraphs_break_lines() {
        let page = "<body><div>One</div><div>Two</div><p>Three</p><p>Four</p>Five<br>Six</body>";
        assert_eq!(
            html::visible_text(page),
            "One\nTwo\n\nThree\n\nFour\n\nFive\nSix"
        );
    }

    #[test]
    fn test_sections_survive_flattening() {
        let page = r#"<html><body>
            <nav><a href="/jobs">Jobs</a></nav>
            <section>
              <h2>About the job</h2>
              <p>Build   cool stuff.</p>
            </section>
            <section>
              <h2>About the company</h2>
              <div>Acme Inc.</div>
              <p>Other stuff</p>
            </section>
        </body></html>"#;

        let text = PageFormat::Html.visible_text(page);
        let result = extract::extract(&text);
        assert!(result.job.starts_with("Build cool stuff."));
        assert_eq!(result.company, "Acme Inc.");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(html::visible_text(""), "");
        assert_eq!(html::visible_text("<html><body>   </body></html>"), "");
    }
}
