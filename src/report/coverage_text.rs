use crate::coverage::coverage_map::CoverageMap;

pub const RESIDUES_PER_LINE: usize = 60;
pub const UNCOVERED_SYMBOL: char = '.';

/// Renders the protein as blocks of two lines: residues with a 1-based
/// `start-end` label, then one class symbol per residue
/// (`.` uncovered, `n`/`w`/`i`/`s` for NonFlyer/Weak/Intermediate/Strong).
pub fn render_coverage(sequence: &str, coverage: &CoverageMap) -> String {
    let residues: Vec<char> = sequence.chars().collect();
    let mut out = String::new();
    for (line_idx, chunk) in residues.chunks(RESIDUES_PER_LINE).enumerate() {
        let start = line_idx * RESIDUES_PER_LINE;
        let end = start + chunk.len();
        let track: String = (start..end)
            .map(|i| {
                coverage
                    .display_class(i)
                    .map(|x| x.symbol())
                    .unwrap_or(UNCOVERED_SYMBOL)
            })
            .collect();
        let line: String = chunk.iter().collect();
        out.push_str(&format!(
            "{:<width$}  {}-{}\n",
            line,
            start + 1,
            end,
            width = RESIDUES_PER_LINE
        ));
        out.push_str(&track);
        out.push('\n');
    }
    out
}
