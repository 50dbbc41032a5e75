use crate::event::TerminalEvent;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

type ListenerFn<Msg> = Arc<dyn Fn(&TerminalEvent) -> Option<Msg> + Send + Sync>;

/// A document-level event listener managed by the runtime.
///
/// Subscriptions are declared in [`Model::subscriptions`](crate::Model::subscriptions)
/// (or [`Component::subscriptions`](crate::Component::subscriptions)) and are
/// registered or released through diffing: after every update the runtime
/// compares the declared set with the registered set, registers the new ones,
/// releases the missing ones, and refreshes the mapping closure of the ones
/// that stay. Every terminal event is offered to each registered listener in
/// registration order; a listener returning `Some(msg)` feeds `msg` into
/// `update`.
///
/// Because a listener exists only while some state declares it, there is no
/// code path that registers one without a matching release.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) listener: ListenerFn<Msg>,
}

/// Identity for diffing subscriptions between update cycles.
///
/// Each subscription carries a `SubscriptionId` composed of a Rust [`TypeId`]
/// and a numeric discriminant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: 0,
        }
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self {
            type_id: TypeId::of::<T>(),
            discriminant: hasher.finish(),
        }
    }
}

/// Register a document listener under `id`.
///
/// `map` sees every terminal event while the subscription is declared and
/// returns `Some(msg)` for the events it cares about.
///
/// # Example
///
/// ```rust,ignore
/// use taro_core::{listen, SubscriptionId, TerminalEvent};
/// use crossterm::event::KeyCode;
///
/// struct EscapeListener;
///
/// let sub = listen(SubscriptionId::of::<EscapeListener>(), |ev| {
///     ev.is_key(KeyCode::Esc).then_some(Msg::Dismiss)
/// });
/// ```
pub fn listen<Msg: Send + 'static>(
    id: SubscriptionId,
    map: impl Fn(&TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    Subscription {
        id,
        listener: Arc::new(map),
    }
}

/// Marker type identifying the application-wide terminal event listener.
pub struct TerminalEvents;

/// Listen to every terminal event under the [`TerminalEvents`] identity.
///
/// This is the usual top-level subscription of an application: map keys and
/// mouse events into the model's message type.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::KeyPress(*key)),
///         TerminalEvent::Resize(w, h) => Some(Msg::Resize(*w, *h)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(&TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    listen(SubscriptionId::of::<TerminalEvents>(), map)
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// The identity used for diffing.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Offer `event` to this listener.
    pub fn handle(&self, event: &TerminalEvent) -> Option<Msg> {
        (self.listener)(event)
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let inner = self.listener;
        Subscription {
            id: self.id,
            listener: Arc::new(move |event: &TerminalEvent| inner(event).map(&f)),
        }
    }
}

/// Registered listeners, in registration order, with diffing between cycles.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: Vec<(SubscriptionId, ListenerFn<Msg>)>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new() -> Self {
        Self { active: Vec::new() }
    }

    /// Diff declared subscriptions against registered ones.
    ///
    /// Surviving listeners keep their position and take the newly declared
    /// closure; new ones are appended in declaration order. When an id is
    /// declared twice the first declaration wins.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut incoming: HashMap<SubscriptionId, ListenerFn<Msg>> = HashMap::new();
        let mut order = Vec::new();
        for sub in declared {
            if !incoming.contains_key(&sub.id) {
                order.push(sub.id.clone());
                incoming.insert(sub.id, sub.listener);
            }
        }

        let before = self.active.len();
        self.active.retain_mut(|(id, listener)| match incoming.remove(&*id) {
            Some(fresh) => {
                *listener = fresh;
                true
            }
            None => false,
        });
        let released = before - self.active.len();
        if released > 0 {
            log::debug!("released {released} document listener(s)");
        }

        for id in order {
            if let Some(listener) = incoming.remove(&id) {
                log::debug!("registered document listener {id:?}");
                self.active.push((id, listener));
            }
        }
    }

    /// Offer `event` to every registered listener and collect the messages
    /// they produce, in registration order.
    pub fn dispatch(&self, event: &TerminalEvent) -> Vec<Msg> {
        self.active
            .iter()
            .filter_map(|(_, listener)| listener(event))
            .collect()
    }

    /// Release every listener.
    pub fn shutdown(&mut self) {
        if !self.active.is_empty() {
            log::debug!("releasing {} document listener(s) on shutdown", self.active.len());
        }
        self.active.clear();
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct A;
    struct B;

    fn esc() -> TerminalEvent {
        TerminalEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
    }

    fn constant(id: SubscriptionId, value: i32) -> Subscription<i32> {
        listen(id, move |_| Some(value))
    }

    #[test]
    fn subscription_id_equality() {
        assert_eq!(SubscriptionId::of::<String>(), SubscriptionId::of::<String>());
        assert_ne!(SubscriptionId::of::<String>(), SubscriptionId::of::<i32>());
    }

    #[test]
    fn subscription_id_with_discriminant() {
        assert_ne!(SubscriptionId::new::<String>(1), SubscriptionId::new::<String>(2));
    }

    #[test]
    fn subscription_id_with_str() {
        let id1 = SubscriptionId::with_str::<String>("a");
        let id2 = SubscriptionId::with_str::<String>("b");
        assert_ne!(id1, id2);
        assert_eq!(id1, SubscriptionId::with_str::<String>("a"));
    }

    #[test]
    fn map_transforms_messages() {
        let sub = listen(SubscriptionId::of::<A>(), |ev| ev.is_key(KeyCode::Esc).then_some(1));
        let mapped = sub.map(|n| n * 10);
        assert_eq!(mapped.handle(&esc()), Some(10));
        assert_eq!(mapped.handle(&TerminalEvent::FocusLost), None);
    }

    #[test]
    fn manager_registers_new() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![constant(SubscriptionId::of::<A>(), 1)]);
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn manager_releases_removed() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![constant(SubscriptionId::of::<A>(), 1)]);
        manager.reconcile(vec![]);
        assert_eq!(manager.len(), 0);
        assert!(manager.dispatch(&esc()).is_empty());
    }

    #[test]
    fn manager_refreshes_surviving_listener() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![constant(SubscriptionId::of::<A>(), 1)]);
        manager.reconcile(vec![constant(SubscriptionId::of::<A>(), 2)]);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.dispatch(&esc()), vec![2]);
    }

    #[test]
    fn manager_dispatches_in_registration_order() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![constant(SubscriptionId::of::<A>(), 1)]);
        // B is declared first this time but A was registered earlier.
        manager.reconcile(vec![
            constant(SubscriptionId::of::<B>(), 2),
            constant(SubscriptionId::of::<A>(), 1),
        ]);
        assert_eq!(manager.dispatch(&esc()), vec![1, 2]);
    }

    #[test]
    fn manager_keeps_first_duplicate() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![
            constant(SubscriptionId::of::<A>(), 1),
            constant(SubscriptionId::of::<A>(), 2),
        ]);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.dispatch(&esc()), vec![1]);
    }

    #[test]
    fn manager_shutdown() {
        let mut manager = SubscriptionManager::new();
        manager.reconcile(vec![
            constant(SubscriptionId::of::<A>(), 1),
            constant(SubscriptionId::of::<B>(), 2),
        ]);
        assert_eq!(manager.len(), 2);
        manager.shutdown();
        assert_eq!(manager.len(), 0);
    }
}
