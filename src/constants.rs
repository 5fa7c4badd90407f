pub mod limits {

    pub const NAME_MAX_LEN: usize = 20;

    pub const TITLE_MAX_LEN: usize = 30;

    pub const BUSINESS_UNIT_MAX_LEN: usize = 20;

    pub const SCORE_MIN: i32 = 1;

    pub const SCORE_MAX: i32 = 100;
}

pub mod status {

    /// Status assigned to every newly created opportunity
    pub const NEW: &str = "New";
}
