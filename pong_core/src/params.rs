/// Game tuning parameters for the two-paddle table
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const TABLE_WIDTH: f32 = 400.0;
    pub const TABLE_HEIGHT: f32 = 800.0;
    pub const WALL_THICKNESS: f32 = 10.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_EDGE_OFFSET: f32 = 60.0; // distance from the owning edge

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const RESPAWN_SPEED_MIN: f32 = 5.0; // per velocity component, units per step
    pub const RESPAWN_SPEED_MAX: f32 = 8.0;

    // Score
    pub const WIN_SCORE: u32 = 10; // First to 10 wins

    // Remote input
    pub const REMOTE_DEADBAND: f32 = 5.0;

    // Physics
    pub const FIXED_DT: f32 = 1.0; // one frame
    pub const MAX_DT: f32 = 8.0; // Clamp to prevent large jumps
}
