/// Per-execution-context state the implicit-subject search reads from.
///
/// Each worker (thread, fiber, interpreter instance) owns its own context;
/// there is no process-wide slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputContext {
    last_input: Option<String>,
}

impl InputContext {
    pub fn new() -> InputContext {
        InputContext::default()
    }

    /// Record the most recently read input, replacing the previous one.
    pub fn set_last_input(&mut self, input: impl Into<String>) {
        self.last_input = Some(input.into());
    }

    pub fn clear_last_input(&mut self) {
        self.last_input = None;
    }

    pub fn last_input(&self) -> Option<&str> {
        self.last_input.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_input_context_slot() {
        let mut ctx = InputContext::new();
        assert_eq!(ctx.last_input(), None);
        ctx.set_last_input("line 1");
        ctx.set_last_input(String::from("line 2"));
        assert_eq!(ctx.last_input(), Some("line 2"));
        ctx.clear_last_input();
        assert_eq!(ctx.last_input(), None);
    }

    #[test]
    fn test_input_context_independent() {
        let mut a = InputContext::new();
        let b = InputContext::new();
        a.set_last_input("only a");
        assert_eq!(a.last_input(), Some("only a"));
        assert_eq!(b.last_input(), None);
    }
}
