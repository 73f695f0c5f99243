use std::fmt::Display;

/// Byte offsets into the source, end exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
	pub fn from(start: u32, end: u32) -> Self {
		Self { start, end }
	}

	pub fn shifted(&self, offset: u32) -> Self {
		Self { start: self.start + offset, end: self.end + offset }
	}
}

impl Display for SrcSpan {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}
