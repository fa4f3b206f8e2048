/// Supplies a presentation-ready label for log lines and UI surfaces.
pub trait Displayable {
    fn display_label(&self) -> String;
}
