pub mod aggregate;
pub mod simulator;

pub use aggregate::{
    issue_code, CreateDistributionDto, DistributionItem, DistributionListQuery, DistributionRequest,
    DistributionStatus, IssueDetail, UpdateDistributionStatusDto, MIN_ADDRESS_LEN,
};
pub use simulator::{
    Chance, DistributionDraft, LocalDistributionRequest, ProductLine, SimulatorConfig,
    StatusSimulator, Transition,
};
