/// Everything an input adapter may ask of a running session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Absolute position in field units, before clamping.
    MovePlayer { x: f32, y: f32 },
    Fire,
    Pause,
    Resume,
    /// Clear the field and start over.  Also serves "new game".
    Restart,
}
