// Dashboard stats: pure reductions over already-fetched rows, plus the
// thin handlers that feed them.

pub mod aggregate;
pub mod handlers;
