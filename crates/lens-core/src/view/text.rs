//! Plain-text rendering of a [`PageView`] for terminals

use super::html::StockContext;
use super::state::{OrganizationView, PageView};

/// Render the document as numbered, sentiment-tagged lines
///
/// Hovered sentences are marked with `>`, expanded ones list an info box per
/// organization underneath.
pub fn render_text(page: &PageView) -> String {
    let entries = match page {
        PageView::Uploading => return "UPLOADING...\n".to_string(),
        PageView::Failed(msg) => return format!("Error: {msg}\n"),
        PageView::Ready(entries) => entries,
    };

    let mut output = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let sentence = &entry.segment.sentence;
        let marker = if entry.view.hovered { '>' } else { ' ' };
        let toggle = match (entry.segment.organizations.len(), entry.view.expanded) {
            (0, _) => "   ",
            (_, true) => "[-]",
            (_, false) => "[+]",
        };
        output.push_str(&format!(
            "{marker}{index:>3} {toggle} ({}) {}\n",
            sentence.sentiment,
            sentence.text.trim()
        ));

        if !entry.view.expanded {
            continue;
        }

        for (mention, state) in entry.segment.organizations.iter().zip(&entry.organizations) {
            output.push_str(&format!("         * {}\n", mention.name));
            match state {
                OrganizationView::Loading => output.push_str("             Loading...\n"),
                OrganizationView::Failed(msg) => {
                    output.push_str(&format!("             Error: {msg}\n"));
                },
                OrganizationView::Loaded(org) => {
                    let Some(stock) = StockContext::from_org(org) else {
                        continue;
                    };
                    output.push_str(&format!(
                        "             Stock: {}  Price: {}  P/E: {}  FCF: {}\n",
                        stock.symbol, stock.price, stock.pe_ratio, stock.free_cash_flow_annual
                    ));
                    output.push_str(&format!(
                        "             Rating: {} ({} recommendations)\n",
                        stock.rating_text, stock.rating
                    ));
                    if let Some(social) = stock.social {
                        output.push_str(&format!(
                            "             Reddit: {} mentions at {}\n",
                            social.mention, social.at_time
                        ));
                    }
                },
            }
        }
    }
    output
}
