use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use crate::event::TerminalEvent;
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Model`] without a real terminal.
///
/// `TestProgram` exercises the init/update/view cycle in a plain `#[test]`
/// function -- no tokio runtime or TTY required. Synchronous commands (e.g.
/// [`Command::message`]) are collected and flushed with
/// [`drain_messages`](TestProgram::drain_messages); async commands are
/// ignored. Declared listeners are reconciled after every update exactly as
/// the real runtime does, so [`dispatch`](TestProgram::dispatch) delivers a
/// terminal event to whatever the model is listening to right now.
///
/// # Example
///
/// ```rust,ignore
/// use taro_core::testing::TestProgram;
///
/// let mut prog = TestProgram::<Picker>::new(());
/// prog.dispatch(TerminalEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
/// prog.drain_messages();
/// assert_eq!(prog.model().choice(), Some(&"fr"));
/// assert!(prog.render_string(40, 6).contains("France"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending_messages: Vec<M::Message>,
    listeners: SubscriptionManager<M::Message>,
}

impl<M: Model> TestProgram<M> {
    /// Create a test program by calling [`Model::init`] with the given flags.
    ///
    /// Any synchronous messages produced by `init` are queued; call
    /// [`drain_messages`](TestProgram::drain_messages) to process them.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending_messages: Vec::new(),
            listeners: SubscriptionManager::new(),
        };
        program.collect_sync_messages(init_cmd);
        program.reconcile();
        program
    }

    /// Send a message, triggering a single update cycle.
    pub fn send(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.collect_sync_messages(cmd);
        self.reconcile();
    }

    /// Offer a terminal event to the registered listeners and apply the
    /// messages they produce, in registration order.
    ///
    /// Follow-up messages from the resulting commands stay queued until
    /// [`drain_messages`](TestProgram::drain_messages).
    pub fn dispatch(&mut self, event: TerminalEvent) {
        for msg in self.listeners.dispatch(&event) {
            self.send(msg);
        }
    }

    /// Process all pending synchronous messages.
    ///
    /// Repeatedly drains the queue until no new synchronous messages are
    /// generated, covering chains where one update produces the message
    /// that triggers the next.
    pub fn drain_messages(&mut self) {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg);
            }
        }
    }

    /// Number of document listeners currently registered.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Get a mutable reference to the model for direct test setup.
    ///
    /// Listeners are not reconciled until the next message.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        render_with(width, height, |frame| self.model.view(frame))
    }

    /// Render the model and return the visible content as a plain string.
    ///
    /// Rows are separated by newlines; trailing whitespace is preserved.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        buffer_to_string(&self.render(width, height))
    }

    fn reconcile(&mut self) {
        self.listeners.reconcile(self.model.subscriptions());
    }

    fn collect_sync_messages(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Action(Action::Quit) => {}
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            // Async commands can't be executed synchronously in tests
            CommandInner::Future(_) => {}
        }
    }
}

/// Render a [`Component`] into `area` of a `width` x `height` test buffer.
///
/// The area is passed to [`Component::view`] untouched, so overlay content
/// drawn outside it (an open option list) is captured too.
pub fn render_component<C: Component>(component: &C, width: u16, height: u16, area: Rect) -> Buffer {
    render_with(width, height, |frame| component.view(frame, area))
}

/// Flatten a buffer into newline-separated rows of cell symbols.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut output = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            output.push_str(buf[(x, y)].symbol());
        }
        if y + 1 < area.bottom() {
            output.push('\n');
        }
    }
    output
}

fn render_with(width: u16, height: u16, draw: impl FnOnce(&mut ratatui::Frame)) -> Buffer {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test backend never fails");
    let mut draw = Some(draw);
    terminal
        .draw(|frame| {
            if let Some(draw) = draw.take() {
                draw(frame);
            }
        })
        .expect("test backend never fails");
    terminal.backend().buffer().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{terminal_events, Subscription};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::widgets::Paragraph;

    struct Counter {
        count: i64,
        armed: bool,
    }

    #[derive(Debug)]
    enum CounterMsg {
        Increment,
        Arm,
        Disarm,
    }

    impl Model for Counter {
        type Message = CounterMsg;
        type Flags = i64;

        fn init(initial: i64) -> (Self, Command<CounterMsg>) {
            (
                Counter {
                    count: initial,
                    armed: false,
                },
                Command::none(),
            )
        }

        fn update(&mut self, msg: CounterMsg) -> Command<CounterMsg> {
            match msg {
                CounterMsg::Increment => self.count += 1,
                CounterMsg::Arm => self.armed = true,
                CounterMsg::Disarm => self.armed = false,
            }
            Command::none()
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            let text = format!("Count: {}", self.count);
            frame.render_widget(Paragraph::new(text), frame.area());
        }

        fn subscriptions(&self) -> Vec<Subscription<CounterMsg>> {
            if !self.armed {
                return vec![];
            }
            vec![terminal_events(|ev| {
                ev.is_key(KeyCode::Char('+')).then_some(CounterMsg::Increment)
            })]
        }
    }

    fn plus() -> TerminalEvent {
        TerminalEvent::Key(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE))
    }

    #[test]
    fn test_program_init_with_flags() {
        let prog = TestProgram::<Counter>::new(42);
        assert_eq!(prog.model().count, 42);
    }

    #[test]
    fn test_program_send() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::Increment);
        prog.send(CounterMsg::Increment);
        assert_eq!(prog.model().count, 2);
    }

    #[test]
    fn test_program_render_after_update() {
        let mut prog = TestProgram::<Counter>::new(0);
        prog.send(CounterMsg::Increment);
        let content = prog.render_string(40, 1);
        assert!(content.contains("Count: 1"));
    }

    #[test]
    fn listeners_follow_declared_state() {
        let mut prog = TestProgram::<Counter>::new(0);
        assert_eq!(prog.listener_count(), 0);
        prog.dispatch(plus());
        assert_eq!(prog.model().count, 0);

        prog.send(CounterMsg::Arm);
        assert_eq!(prog.listener_count(), 1);
        prog.dispatch(plus());
        assert_eq!(prog.model().count, 1);

        prog.send(CounterMsg::Disarm);
        assert_eq!(prog.listener_count(), 0);
        prog.dispatch(plus());
        assert_eq!(prog.model().count, 1);
    }

    struct ChainModel {
        steps: Vec<String>,
    }

    #[derive(Debug)]
    enum ChainMsg {
        Start,
        Step(String),
    }

    impl Model for ChainModel {
        type Message = ChainMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<ChainMsg>) {
            (ChainModel { steps: vec![] }, Command::none())
        }

        fn update(&mut self, msg: ChainMsg) -> Command<ChainMsg> {
            match msg {
                ChainMsg::Start => {
                    self.steps.push("started".into());
                    Command::message(ChainMsg::Step("auto".into()))
                }
                ChainMsg::Step(s) => {
                    self.steps.push(s);
                    Command::none()
                }
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.steps.join(", ")), frame.area());
        }
    }

    #[test]
    fn test_command_message_chaining() {
        let mut prog = TestProgram::<ChainModel>::new(());
        prog.send(ChainMsg::Start);
        prog.drain_messages();
        assert_eq!(prog.model().steps, vec!["started", "auto"]);
    }

    struct Label(&'static str);

    impl Component for Label {
        type Message = ();

        fn update(&mut self, _: ()) -> Command<()> {
            Command::none()
        }

        fn view(&self, frame: &mut ratatui::Frame, area: Rect) {
            frame.render_widget(Paragraph::new(self.0), area);
        }
    }

    #[test]
    fn render_component_draws_into_area() {
        let buf = render_component(&Label("hi"), 6, 2, Rect::new(2, 1, 4, 1));
        assert_eq!(buffer_to_string(&buf), "      \n  hi  ");
    }
}
