use stackring::Direction;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Rotate(Direction),
    Reset,
    ConfigReload,
}
