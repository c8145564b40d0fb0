/// Separator placed between completed sections in the final report
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// Join completed sections, in the order given, into one document
pub fn synthesize<S: AsRef<str>>(sections: &[S]) -> String {
    sections
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}
