//! コーディネーター出力をインサイトのブロックに分割する
//!
//! `**` で始まる行ごとに新しいブロックを始める。最初の見出しより前の文章は 1 つ目のブロック。
//! 件数の検証はしない（表示側が実際の件数を出す）。

pub fn extract_insights(raw_text: &str) -> Vec<String> {
    let text = raw_text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    for line in text.split('\n') {
        match blocks.last_mut() {
            Some(current) if !line.starts_with("**") => current.push(line),
            _ => blocks.push(vec![line]),
        }
    }
    blocks
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .filter(|b| !b.is_empty())
        .collect()
}
