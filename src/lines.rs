use memchr::Memchr;

/// Splits text into lines, each keeping its `\n` terminator.
#[derive(Debug)]
pub struct LineSplitter<'a> {
    string: &'a str,
    cur_start: usize,
    memchr: Memchr<'a>,
}

impl<'a> LineSplitter<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            string,
            memchr: memchr::memchr_iter(b'\n', string.as_bytes()),
            cur_start: 0,
        }
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let cur_end = match self.memchr.next() {
            Some(end) => end + 1,
            None if self.cur_start < self.string.len() => self.string.len(),
            None => return None,
        };
        // `\n` is ASCII, so both ends sit on char boundaries
        let line = &self.string[self.cur_start..cur_end];
        self.cur_start = cur_end;
        Some(line)
    }
}

/// Splits an artifact into owned lines, see [LineSplitter].
pub fn split_lines(text: &str) -> Vec<String> {
    LineSplitter::new(text).map(str::to_owned).collect()
}

/// Concatenates lines back into the artifact text.
pub fn join_lines(lines: &[String]) -> String {
    lines.concat()
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n"
}

/// Removes all trailing empty lines.
pub fn trim_trailing_blank(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
}

/// Removes all trailing empty lines and makes sure the last line is terminated.
pub fn normalize(lines: &mut Vec<String>) {
    trim_trailing_blank(lines);
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
}

/// Returns the last non-blank line with its zero-based index.
pub fn last_line(lines: &[String]) -> Option<(usize, &str)> {
    lines
        .iter()
        .enumerate()
        .rev()
        .find(|(_, line)| !is_blank(line))
        .map(|(idx, line)| (idx, line.as_str()))
}
