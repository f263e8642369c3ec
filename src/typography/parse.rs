//! Extract per-weight font file references from a font description.
//!
//! The description is CSS made of `@font-face` blocks. Each block pairs a
//! `font-weight: <n>` declaration with a `url(...)` pointing at the file.

use super::FontWeight;

/// Return one `(weight, url)` pair per requested weight found in `css`.
///
/// The first block for a weight wins; blocks for weights that were not
/// requested, or without both a weight and an absolute URL, are skipped.
/// Output is ordered by weight.
pub fn parse_font_faces(css: &str, requested: &[FontWeight]) -> Vec<(FontWeight, String)> {
    let mut found: Vec<(FontWeight, String)> = Vec::new();

    for block in css.split("@font-face").skip(1) {
        let weight = match block_weight(block).and_then(FontWeight::from_numeric) {
            Some(w) => w,
            None => continue,
        };
        if !requested.contains(&weight) || found.iter().any(|(w, _)| *w == weight) {
            continue;
        }
        if let Some(url) = block_url(block) {
            found.push((weight, url));
        }
    }

    found.sort_by_key(|(w, _)| *w);
    found
}

fn block_weight(block: &str) -> Option<u16> {
    let start = block.find("font-weight")? + "font-weight".len();
    let rest = block[start..].trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn block_url(block: &str) -> Option<String> {
    let mut rest = block;
    while let Some(pos) = rest.find("url(") {
        let after = &rest[pos + 4..];
        let end = after.find(')')?;
        let candidate = after[..end].trim().trim_matches(|c| c == '\'' || c == '"');
        if candidate.starts_with("https://") || candidate.starts_with("http://") {
            return Some(candidate.to_string());
        }
        rest = &after[end..];
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typography::PDF_WEIGHTS;

    const CSS: &str = r#"
@font-face {
  font-family: 'Inter';
  font-style: normal;
  font-weight: 900;
  src: url(https://fonts.gstatic.com/s/inter/v13/black.ttf) format('truetype');
}
@font-face {
  font-family: 'Inter';
  font-style: normal;
  font-weight: 400;
  src: url(https://fonts.gstatic.com/s/inter/v13/regular.ttf) format('truetype');
}
@font-face {
  font-family: 'Inter';
  font-style: normal;
  font-weight:700;
  src: url("https://fonts.gstatic.com/s/inter/v13/bold.ttf") format('truetype');
}
"#;

    #[test]
    fn extracts_each_requested_weight_in_order() {
        let faces = parse_font_faces(CSS, &PDF_WEIGHTS);
        assert_eq!(
            faces,
            vec![
                (FontWeight::Regular, "https://fonts.gstatic.com/s/inter/v13/regular.ttf".to_string()),
                (FontWeight::Bold, "https://fonts.gstatic.com/s/inter/v13/bold.ttf".to_string()),
                (FontWeight::Black, "https://fonts.gstatic.com/s/inter/v13/black.ttf".to_string()),
            ]
        );
    }

    #[test]
    fn ignores_unrequested_and_duplicate_weights() {
        let css = format!(
            "{}\n@font-face {{ font-weight: 400; src: url(https://other/regular.ttf); }}\n@font-face {{ font-weight: 300; src: url(https://x/light.ttf); }}",
            CSS
        );
        let faces = parse_font_faces(&css, &[FontWeight::Regular]);
        assert_eq!(faces.len(), 1);
        assert!(faces[0].1.ends_with("/inter/v13/regular.ttf"));
    }

    #[test]
    fn skips_blocks_without_absolute_url() {
        let css = "@font-face { font-weight: 400; src: local('Inter'), url(/relative.ttf); }";
        assert!(parse_font_faces(css, &PDF_WEIGHTS).is_empty());
    }

    #[test]
    fn garbage_yields_nothing() {
        assert!(parse_font_faces("<html>503 Service Unavailable</html>", &PDF_WEIGHTS).is_empty());
        assert!(parse_font_faces("", &PDF_WEIGHTS).is_empty());
    }
}
