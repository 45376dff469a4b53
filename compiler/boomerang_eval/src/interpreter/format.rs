//! Templated string rendering.

/// Replace each `<i>` in `format` with `params[i]`.
///
/// A single left-to-right pass: substituted text is never rescanned, and a
/// placeholder whose index has no parameter is kept verbatim.
pub fn fill_template(format: &str, params: &[String]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let param = if digits > 0 && after[digits..].starts_with('>') {
            after[..digits]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
        } else {
            None
        };
        match param {
            Some(value) => {
                out.push_str(value);
                rest = &after[digits + 1..];
            }
            None => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
