/// Norwegian electricity bidding zone.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    PartialEq,
    clap::ValueEnum,
    derive_more::Display,
)]
pub enum PriceArea {
    /// Oslo / Øst-Norge
    #[value(name = "NO1")]
    #[display("NO1")]
    No1,

    /// Kristiansand / Sør-Norge
    #[value(name = "NO2")]
    #[display("NO2")]
    No2,

    /// Trondheim / Midt-Norge
    #[value(name = "NO3")]
    #[display("NO3")]
    No3,

    /// Tromsø / Nord-Norge
    #[value(name = "NO4")]
    #[display("NO4")]
    No4,

    /// Bergen / Vest-Norge
    #[value(name = "NO5")]
    #[display("NO5")]
    No5,
}

impl PriceArea {
    pub const fn region(self) -> &'static str {
        match self {
            Self::No1 => "Oslo / Øst-Norge",
            Self::No2 => "Kristiansand / Sør-Norge",
            Self::No3 => "Trondheim / Midt-Norge",
            Self::No4 => "Tromsø / Nord-Norge",
            Self::No5 => "Bergen / Vest-Norge",
        }
    }
}
