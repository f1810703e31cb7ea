// Seeker profile: the 1:1 extension row, its child sections, and the
// completion score surfaced with every profile read.

pub mod completion;
pub mod handlers;
