use crate::action::{Action, PromptAction, UserInput};
use crate::terminal::{CrosstermTerminal, PromptError, Terminal};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Render<S, O> = Box<dyn Fn(&S, &PromptAction<S, O>) -> String>;
type Process<S, O> = Box<dyn Fn(&UserInput, &S) -> PromptAction<S, O>>;

/// An interactive prompt which produces a value of type `O`.
///
/// A prompt is an immutable description; nothing touches the terminal until it is [`run`](Prompt::run).
///
/// ### Example
/// ```no_run
/// use clove_prompt::Prompt;
///
/// let name: String = Prompt::text("What is your name?")
///     .run_interactive()
///     .unwrap();
/// ```
pub struct Prompt<O>(PromptInner<O>);

enum PromptInner<O> {
    Loop(Box<dyn FrameLoop<O>>),
    OnSuccess(Box<dyn Continuation<O>>),
    Succeed(O),
}

// The state type of each loop (and the intermediate type of each chain) is hidden behind these.
trait FrameLoop<O> {
    fn run(self: Box<Self>, terminal: &mut dyn Terminal) -> Result<O, PromptError>;
}

trait Continuation<O> {
    fn run(self: Box<Self>, terminal: &mut dyn Terminal) -> Result<O, PromptError>;
}

struct Frames<S, O> {
    initial: S,
    render: Render<S, O>,
    process: Process<S, O>,
}

impl<S: Clone, O> FrameLoop<O> for Frames<S, O> {
    fn run(self: Box<Self>, terminal: &mut dyn Terminal) -> Result<O, PromptError> {
        let Frames {
            initial,
            render,
            process,
        } = *self;
        let mut state = initial;
        let mut action = PromptAction::NextFrame(state.clone());

        loop {
            terminal.display(&render(&state, &action))?;
            let input = terminal.user_input()?;

            if input.kind() == Action::Exit {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Prompt interrupted.");
                }
                return Err(PromptError::Interrupted);
            }

            match process(&input, &state) {
                PromptAction::NextFrame(next) => {
                    state = next;
                    action = PromptAction::NextFrame(state.clone());
                }
                PromptAction::Submit(value) => {
                    let submitted = PromptAction::Submit(value);
                    terminal.display(&render(&state, &submitted))?;

                    return match submitted {
                        PromptAction::Submit(value) => Ok(value),
                        _ => unreachable!("internal error - submitted must be a Submit"),
                    };
                }
                transient => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Prompt redraw without state change for {:?}.", input.kind());
                    }
                    action = transient;
                }
            }
        }
    }
}

struct Chain<A, O> {
    first: Prompt<A>,
    next: Box<dyn FnOnce(A) -> Prompt<O>>,
}

impl<A: 'static, O: 'static> Continuation<O> for Chain<A, O> {
    fn run(self: Box<Self>, terminal: &mut dyn Terminal) -> Result<O, PromptError> {
        let Chain { first, next } = *self;
        let value = first.run(terminal)?;
        next(value).run(terminal)
    }
}

impl<O: 'static> Prompt<O> {
    /// Create a prompt from an initial state and its render/process functions.
    ///
    /// Each frame renders `(state, previous action)`, waits for one [`UserInput`], and processes it into the next [`PromptAction`].
    /// The first frame is rendered with `NextFrame(initial)`, and a `Submit` is rendered once before the prompt returns.
    pub fn custom<S: Clone + 'static>(
        initial: S,
        render: impl Fn(&S, &PromptAction<S, O>) -> String + 'static,
        process: impl Fn(&UserInput, &S) -> PromptAction<S, O> + 'static,
    ) -> Self {
        Prompt(PromptInner::Loop(Box::new(Frames {
            initial,
            render: Box::new(render),
            process: Box::new(process),
        })))
    }

    /// A prompt which completes immediately with `value`, without touching the terminal.
    pub fn succeed(value: O) -> Self {
        Prompt(PromptInner::Succeed(value))
    }

    /// Run this prompt to completion, then run the prompt built from its value.
    pub fn and_then<P: 'static>(self, next: impl FnOnce(O) -> Prompt<P> + 'static) -> Prompt<P> {
        Prompt(PromptInner::OnSuccess(Box::new(Chain {
            first: self,
            next: Box::new(next),
        })))
    }

    /// Transform the value of this prompt.
    pub fn map<P: 'static>(self, f: impl FnOnce(O) -> P + 'static) -> Prompt<P> {
        self.and_then(move |value| Prompt::succeed(f(value)))
    }

    /// Run the prompt against a terminal.
    pub fn run(self, terminal: &mut dyn Terminal) -> Result<O, PromptError> {
        match self.0 {
            PromptInner::Loop(frames) => frames.run(terminal),
            PromptInner::OnSuccess(chain) => chain.run(terminal),
            PromptInner::Succeed(value) => Ok(value),
        }
    }

    /// Run the prompt against the process terminal.
    /// The terminal is restored when this returns, including when the user interrupts the prompt.
    pub fn run_interactive(self) -> Result<O, PromptError> {
        let mut terminal = CrosstermTerminal::session()?;
        self.run(&mut terminal)
    }
}
