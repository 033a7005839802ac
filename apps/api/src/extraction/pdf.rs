use anyhow::{anyhow, Result};

/// Extracts text page by page. Pages with no extractable text (scans, blank
/// separators) are skipped; the rest are joined with newlines.
pub fn extract(data: &[u8]) -> Result<String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data).map_err(|e| anyhow!("{e}"))?;
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PDF with one page per entry, Helvetica text at the top left.
    /// An empty entry gives a page with an empty content stream.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 712 Td ({text}) Tj ET")
            };
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, object) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", i + 1).as_bytes());
        }

        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref}\n%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    #[test]
    fn test_blank_page_skipped_in_real_pdf() {
        let pdf = build_pdf(&["", "Won the Turing award."]);

        let pages = pdf_extract::extract_text_from_mem_by_pages(&pdf).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].trim().is_empty());

        let text = extract(&pdf).unwrap();
        assert!(text.contains("Won the Turing award."));
        assert_eq!(text.matches("Turing").count(), 1);
    }

    #[test]
    fn test_real_pdf_pages_keep_order() {
        let pdf = build_pdf(&["Founder of Acme.", "", "Holds a patent."]);
        let text = extract(&pdf).unwrap();

        let founder = text.find("Founder of Acme.").unwrap();
        let patent = text.find("Holds a patent.").unwrap();
        assert!(founder < patent);
    }

    #[test]
    fn test_pages_joined_with_newline() {
        let pages = vec!["Page one.".to_string(), "Page two.".to_string()];
        assert_eq!(join_pages(pages), "Page one.\nPage two.");
    }

    #[test]
    fn test_textless_pages_skipped() {
        let pages = vec![
            String::new(),
            "Founder of Acme.".to_string(),
            "  \n ".to_string(),
            "Patent holder.".to_string(),
        ];
        assert_eq!(join_pages(pages), "Founder of Acme.\nPatent holder.");
    }

    #[test]
    fn test_no_pages_yields_empty_text() {
        assert_eq!(join_pages(Vec::new()), "");
    }
}
