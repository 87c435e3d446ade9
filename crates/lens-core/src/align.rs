//! Sentence/organization alignment by character offset

use crate::model::{OrganizationMention, Segment, Sentence};

/// Organizations whose offset falls in `[start, start + len)`
///
/// Input order is preserved.
pub fn contained_orgs(
    start: usize,
    len: usize,
    orgs: &[OrganizationMention],
) -> Vec<OrganizationMention> {
    let end = start.saturating_add(len);
    orgs.iter()
        .filter(|org| org.offset >= start && org.offset < end)
        .cloned()
        .collect()
}

/// Build one segment per sentence, in sentence order
pub fn align(sentences: &[Sentence], orgs: &[OrganizationMention]) -> Vec<Segment> {
    sentences
        .iter()
        .map(|sentence| Segment {
            sentence: sentence.clone(),
            organizations: contained_orgs(sentence.offset, sentence.length, orgs),
        })
        .collect()
}

/// Mentions whose name does not appear at their offset in `text`
///
/// Offsets are counted in code points. A non-empty result means the
/// entity and sentiment endpoints disagree on the offset unit and
/// alignment cannot be trusted for those mentions.
pub fn offset_mismatches<'a>(
    text: &str,
    orgs: &'a [OrganizationMention],
) -> Vec<&'a OrganizationMention> {
    orgs.iter()
        .filter(|org| {
            let expected = org.name.chars().count();
            !text
                .chars()
                .skip(org.offset)
                .take(expected)
                .eq(org.name.chars())
        })
        .collect()
}
