// Applications: created once per (seeker, posting) pair by the seeker,
// status driven by the owning employer. Both directions fan out a
// notification to the counterparty.

pub mod handlers;
