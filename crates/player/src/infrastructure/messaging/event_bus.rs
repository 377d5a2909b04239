//! Fan-out of decoded backend events.
//!
//! The bridge task is the only producer. Subscribers run inline, in
//! registration order, so an event is fully delivered before the next one.

use literaplay_shared::BackendEvent;

#[cfg(not(target_arch = "wasm32"))]
type Subscriber = Box<dyn FnMut(BackendEvent) + Send + 'static>;
#[cfg(target_arch = "wasm32")]
type Subscriber = Box<dyn FnMut(BackendEvent) + 'static>;

#[cfg(not(target_arch = "wasm32"))]
type Subscribers = std::sync::Arc<tokio::sync::Mutex<Vec<Subscriber>>>;
#[cfg(target_arch = "wasm32")]
type Subscribers = send_wrapper::SendWrapper<std::rc::Rc<std::cell::RefCell<Vec<Subscriber>>>>;

/// Subscribers live as long as the bus.
#[derive(Clone)]
pub struct EventBus {
    subscribers: Subscribers,
}

impl Default for EventBus {
    fn default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let subscribers = std::sync::Arc::new(tokio::sync::Mutex::new(Vec::new()));
        #[cfg(target_arch = "wasm32")]
        let subscribers = send_wrapper::SendWrapper::new(std::rc::Rc::new(
            std::cell::RefCell::new(Vec::new()),
        ));
        Self { subscribers }
    }
}

fn deliver(subscribers: &mut [Subscriber], event: BackendEvent) {
    let Some((last, rest)) = subscribers.split_last_mut() else {
        tracing::warn!(event = event.name(), "No subscriber for backend event");
        return;
    };
    for subscriber in rest {
        subscriber(event.clone());
    }
    last(event);
}

#[cfg(not(target_arch = "wasm32"))]
impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, callback: impl FnMut(BackendEvent) + Send + 'static) {
        self.subscribers.lock().await.push(Box::new(callback));
    }

    pub async fn dispatch(&self, event: BackendEvent) {
        deliver(&mut self.subscribers.lock().await, event);
    }
}

#[cfg(target_arch = "wasm32")]
impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl FnMut(BackendEvent) + 'static) {
        self.subscribers.borrow_mut().push(Box::new(callback));
    }

    pub fn dispatch(&self, event: BackendEvent) {
        deliver(&mut self.subscribers.borrow_mut(), event);
    }
}
