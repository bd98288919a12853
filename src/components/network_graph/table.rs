//! Tab-delimited table parsing: first line is the header row, every
//! following line is a data row.

/// Parsed table: ordered headers plus raw cell values per row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableData {
	pub headers: Vec<String>,
	pub rows: Vec<Vec<String>>,
}

/// Parse tab-delimited text. Rows may carry fewer cells than there are
/// headers; the missing trailing cells are simply absent.
pub fn parse_table(text: &str) -> TableData {
	let mut lines = text.trim().lines();
	let Some(header_line) = lines.next() else {
		return TableData::default();
	};

	let headers: Vec<String> = header_line.split('\t').map(str::to_owned).collect();
	let rows = lines
		.map(|line| line.split('\t').map(str::to_owned).collect())
		.collect();

	TableData { headers, rows }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_headers_and_rows() {
		let table = parse_table("Subject\tPredicate\tObject\n<A>\t<knows>\t<B>\n");
		assert_eq!(table.headers, vec!["Subject", "Predicate", "Object"]);
		assert_eq!(table.rows, vec![vec!["<A>", "<knows>", "<B>"]]);
	}

	#[test]
	fn short_rows_keep_only_present_cells() {
		let table = parse_table("A\tB\tC\nx\ty");
		assert_eq!(table.rows, vec![vec!["x", "y"]]);
	}

	#[test]
	fn empty_input_yields_empty_table() {
		assert_eq!(parse_table(""), TableData::default());
		assert_eq!(parse_table("  \n "), TableData::default());
	}
}
