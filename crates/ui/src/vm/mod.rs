mod challenge_card_vm;
mod detail_vm;

pub use challenge_card_vm::{map_challenge_card, ChallengeCardVm};
pub use detail_vm::{map_challenge_detail, ChallengeDetailVm, ResourceLinkVm};
