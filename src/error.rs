use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid inventory: {0}")]
    InvalidInventory(String),
    #[error("duplicate chip value '{0}'")]
    DuplicateChipValue(u64),
    #[error("no chip denominations available")]
    NoDenominations,
    #[error(
        "not enough chip value for {players} players + {rebuys} rebuys (inventory total {total_value})"
    )]
    Infeasible {
        players: u32,
        rebuys: u32,
        total_value: u64,
    },
    #[error("players must be greater than 0")]
    PlayersZero,
    #[error("target duration must be greater than 0")]
    TargetDurationZero,
    #[error("level duration must be greater than 0")]
    LevelDurationZero,
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
    #[error("missing required setting '{0}'")]
    MissingSetting(&'static str),
    #[error("chips must not be empty")]
    EmptyChips,
    #[error("chips must not contain empty entries")]
    EmptyChipEntry,
    #[error("invalid chip entry '{0}': expected value:quantity[:color]")]
    InvalidChipEntry(String),
    #[error("invalid chip value in '{0}'")]
    InvalidChipValue(String),
    #[error("invalid chip quantity in '{0}'")]
    InvalidChipQuantity(String),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("{0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, Error>;
