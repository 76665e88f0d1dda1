use nd_core::{DocMetadata, Document, NewsItem};

/// Convert normalized news items into text-bearing documents.
///
/// Page content is the trimmed title and trimmed summary joined by a
/// blank line; metadata copies link, published and source verbatim,
/// including absent values. Output count always equals input count.
pub fn news_to_documents(items: &[NewsItem]) -> Vec<Document> {
    items
        .iter()
        .map(|item| {
            let title = item.title.trim();
            let summary = item.summary.trim();
            let page_content = format!("{title}\n\n{summary}").trim().to_string();

            Document {
                page_content,
                metadata: DocMetadata {
                    title: title.to_string(),
                    url: item.link.clone(),
                    published: item.published,
                    source: item.source.clone(),
                },
            }
        })
        .collect()
}
