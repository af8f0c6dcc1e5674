//! File name helpers.

/// Extension of a file name, path or URL, without the dot.
///
/// # Examples
///
/// ```
/// use mediaref_core::extension_of;
///
/// assert_eq!(extension_of("Lieder/HB/Yesterday.m4a"), Some("m4a".to_string()));
/// assert_eq!(extension_of("dir.d/README"), None);
/// ```
pub fn extension_of(name: &str) -> Option<String> {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_string())
}

/// Name of part `no` of a multi-part asset, derived from the first part.
///
/// Part 1 is the file itself; later parts carry a zero-padded `_noNNN`
/// suffix in front of the extension. Returns `None` for part 0 or parts
/// above 999.
///
/// # Examples
///
/// ```
/// use mediaref_core::multi_part_file_name;
///
/// assert_eq!(multi_part_file_name("scan.jpg", 1).as_deref(), Some("scan.jpg"));
/// assert_eq!(multi_part_file_name("scan.jpg", 2).as_deref(), Some("scan_no002.jpg"));
/// assert_eq!(multi_part_file_name("scan.jpg", 42).as_deref(), Some("scan_no042.jpg"));
/// ```
pub fn multi_part_file_name(first: &str, no: u32) -> Option<String> {
    if no == 0 || no > 999 {
        return None;
    }
    if no == 1 {
        return Some(first.to_string());
    }
    let suffix = format!("_no{:03}", no);
    match extension_of(first) {
        Some(extension) => {
            let stem = &first[..first.len() - extension.len() - 1];
            Some(format!("{}{}.{}", stem, suffix, extension))
        }
        None => Some(format!("{}{}", first, suffix)),
    }
}
