use std::borrow::Cow;

pub fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < 3 || bytes.len() > 50 {
        return false;
    }
    true
}

/// Quotes a cell when it contains a separator, a quote or a line break.
/// Inner quotes are doubled.
pub fn escape_csv_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Renders a header and its rows as CSV text, one record per line
pub fn to_csv<R, C>(header: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = Vec<C>>,
    C: AsRef<str>,
{
    let mut lines = vec![header
        .iter()
        .map(|cell| escape_csv_cell(cell))
        .collect::<Vec<_>>()
        .join(",")];

    lines.extend(rows.into_iter().map(|row| {
        row.iter()
            .map(|cell| escape_csv_cell(cell.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }));

    lines.join("\n")
}
