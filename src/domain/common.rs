/// Supplies a presentation-ready label for prompts, summaries, and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
