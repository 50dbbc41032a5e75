use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` is nearly identical to [`Model`](crate::Model) but its
/// [`view`](Component::view) method receives an `area: Rect`, so a parent
/// decides *where* each child renders by passing it a sub-region of the frame.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// lift commands and subscriptions with `map`:
///
/// ```rust,ignore
/// use taro_core::{Command, Component, Model, Subscription};
/// use taro_widgets::select::{self, Select, Selection};
///
/// struct App { fruit: Select<u32> }
///
/// enum AppMsg { Fruit(select::Message<u32>) }
///
/// impl Model for App {
///     type Message = AppMsg;
///     type Flags = ();
///
///     fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///         match msg {
///             AppMsg::Fruit(select::Message::Changed(change)) => {
///                 // The parent owns the value and feeds it back.
///                 self.fruit.set_value(change.value);
///                 Command::none()
///             }
///             AppMsg::Fruit(m) => self.fruit.update(m).map(AppMsg::Fruit),
///         }
///     }
///
///     fn subscriptions(&self) -> Vec<Subscription<AppMsg>> {
///         self.fruit
///             .subscriptions()
///             .into_iter()
///             .map(|s| s.map(AppMsg::Fruit))
///             .collect()
///     }
///     // ...
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    ///
    /// The returned command uses the component's own `Message` type; the
    /// parent calls [`.map()`](Command::map) to lift it.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    ///
    /// Overlay content (such as an open option list) may draw outside `area`;
    /// everything else should stay inside it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare the document listeners this component needs right now.
    ///
    /// The parent collects child subscriptions and includes them in its own
    /// [`Model::subscriptions`](crate::Model::subscriptions), mapping
    /// messages appropriately. Returning a listener only in some states (for
    /// example while a list is open) is how components scope global event
    /// handling: the runtime releases it as soon as it is no longer declared.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing; the default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
