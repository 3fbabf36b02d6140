use chrono::DateTime;

pub const CSV_HEADER: &str = "Date,Team 1 Player 1,Team 1 Player 2,Team 2 Player 1,Team 2 Player 2,Score Team 1,Score Team 2";

/// One completed match, names already resolved
#[derive(Debug, Clone)]
pub struct ExportRow {
    pub timestamp: String, // ISO 8601 string
    pub team1: [String; 2],
    pub team2: [String; 2],
    pub score_team1: i32,
    pub score_team2: i32,
}

pub fn render_matches_csv(rows: &[ExportRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for row in rows {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            format_date(&row.timestamp),
            escape_field(&row.team1[0]),
            escape_field(&row.team1[1]),
            escape_field(&row.team2[0]),
            escape_field(&row.team2[1]),
            row.score_team1,
            row.score_team2,
        ));
    }

    lines.join("\n")
}

fn format_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(names: [&str; 4]) -> ExportRow {
        ExportRow {
            timestamp: "2024-03-09T18:30:05.123+00:00".to_string(),
            team1: [names[0].to_string(), names[1].to_string()],
            team2: [names[2].to_string(), names[3].to_string()],
            score_team1: 6,
            score_team2: 4,
        }
    }

    #[test]
    fn test_header_only_for_no_matches() {
        assert_eq!(render_matches_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_row_layout() {
        let csv = render_matches_csv(&[row(["Ana", "Bea", "Carla", "Dani"])]);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2024-03-09 18:30:05,Ana,Bea,Carla,Dani,6,4");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let csv = render_matches_csv(&[row(["Ana, Jr", "Bea", "Carla \"CJ\"", "Dani"])]);
        let line = csv.lines().nth(1).unwrap();

        assert_eq!(
            line,
            "2024-03-09 18:30:05,\"Ana, Jr\",Bea,\"Carla \"\"CJ\"\"\",Dani,6,4"
        );
    }

    #[test]
    fn test_line_breaks_are_quoted() {
        assert_eq!(escape_field("Ana\r"), "\"Ana\r\"");
        assert_eq!(escape_field("Ana\nBea"), "\"Ana\nBea\"");
        assert_eq!(escape_field("Ana"), "Ana");
    }
}
