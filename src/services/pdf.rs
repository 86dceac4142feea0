use anyhow::{Context, Result};

/// Extracts text page by page. Pages without a text layer come back empty.
pub fn extract_pages(pdf_bytes: &[u8]) -> Result<Vec<String>> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .context("Failed to extract text from PDF")?;

    tracing::debug!("Extracted {} pages from PDF", pages.len());
    Ok(pages)
}

/// Concatenates page texts in page order.
pub fn join_pages(pages: &[String]) -> String {
    pages.concat()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_keeps_order() {
        let pages = vec!["first ".to_string(), String::new(), "second".to_string()];
        assert_eq!(join_pages(&pages), "first second");
    }

    #[test]
    fn test_join_pages_empty() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_extract_pages_rejects_non_pdf() {
        assert!(extract_pages(b"this is not a pdf").is_err());
    }
}
