//! Control flow of override traversal.

use std::ops::Add;

/// Result of one override-traversal step.
///
/// `None` and `Next` both mean "keep going"; only `Stop` aborts a
/// traversal. `None` additionally records that the scope had no override
/// information at all, which lets a capable scope transparently take
/// over from an unsupported one when results are composed with `+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorAction {
    /// Abort the traversal.
    Stop,
    /// Continue; more results may exist.
    Next,
    /// Operation not supported by this scope.
    None,
}

impl ProcessorAction {
    pub fn stop(self) -> bool {
        self == ProcessorAction::Stop
    }

    pub fn next(self) -> bool {
        self != ProcessorAction::Stop
    }
}

impl Add for ProcessorAction {
    type Output = ProcessorAction;

    /// Compose the results of two cooperating scopes: `Next` if either
    /// operand is `Next`, then `Stop` if either is `Stop`.
    fn add(self, other: ProcessorAction) -> ProcessorAction {
        if self == ProcessorAction::Next || other == ProcessorAction::Next {
            return ProcessorAction::Next;
        }
        if self == ProcessorAction::Stop || other == ProcessorAction::Stop {
            return ProcessorAction::Stop;
        }
        self
    }
}
