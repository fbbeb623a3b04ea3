/// What to do with the fragments a close command splits off.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubpathMode {
    /// Re-append the close command to every retained fragment. Use for filled
    /// shapes, so each subpath is guaranteed a closed contour.
    Closed,
    /// Leave fragments open. Use for line-only geometry (graticule meridians
    /// must not be auto-closed).
    Open,
}

/// Normalize a raw path command string into per-subpath strings.
///
/// Accepts comma or whitespace separators and mixed-case move/line/close
/// letters; emits uppercase, single-spaced tokens, one string per subpath.
/// Re-normalizing an already-normalized string yields the same subpaths.
pub fn normalize(raw: &str, mode: SubpathMode) -> Vec<String> {
    let mut padded = String::with_capacity(raw.len() + 16);
    for ch in raw.chars() {
        match ch {
            ',' => padded.push(' '),
            'M' | 'm' => pad_command(&mut padded, 'M'),
            'L' | 'l' => pad_command(&mut padded, 'L'),
            'Z' | 'z' => pad_command(&mut padded, 'Z'),
            c => padded.push(c),
        }
    }

    padded
        .split('Z')
        .map(|fragment| {
            fragment
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| match mode {
            SubpathMode::Closed => format!("{fragment} Z"),
            SubpathMode::Open => fragment,
        })
        .collect()
}

fn pad_command(out: &mut String, command: char) {
    out.push(' ');
    out.push(command);
    out.push(' ');
}
