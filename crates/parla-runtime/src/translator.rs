#![forbid(unsafe_code)]

//! Per-view translation accessor.
//!
//! A [`Translator`] bridges [`LocaleStore`] notifications into a re-render
//! trigger for one consuming view. On construction it captures the store's
//! active locale as local observable state and subscribes to the store;
//! every store change updates that state. The view reacts either by
//! subscribing to the state ([`Translator::on_change`]) or by comparing
//! [`Translator::version`] against the version it last rendered.
//!
//! Dropping the translator (or calling [`Translator::detach`]) removes the
//! store subscription, so no callback outlives its view.
//!
//! `translate` always goes through the store, never through a cached table,
//! so output is current immediately after a locale change even before the
//! view re-renders.

use crate::locale::{Locale, LocaleStore};
use crate::reactive::{Binding, Observable, Subscription, bind_mapped};

/// Reactive translation handle for a single view.
#[derive(Debug)]
pub struct Translator {
    store: LocaleStore,
    locale: Observable<Locale>,
    subscription: Option<Subscription>,
}

impl Translator {
    /// Attach to `store`, capturing its current locale.
    #[must_use]
    pub fn new(store: &LocaleStore) -> Self {
        let locale = Observable::new(store.active_locale());
        let local = locale.clone();
        let subscription = store.subscribe(move |code| {
            local.set(code.to_string());
        });
        Self {
            store: store.clone(),
            locale,
            subscription: Some(subscription),
        }
    }

    /// Translate through the store's current active locale.
    #[must_use]
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.store.translate(key, params)
    }

    /// The locale this view last observed.
    ///
    /// Equal to the store's active locale while attached.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale.get()
    }

    /// Local locale state; changes act as the view's re-render trigger.
    #[must_use]
    pub fn state(&self) -> &Observable<Locale> {
        &self.locale
    }

    /// Number of locale changes this view has observed.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.locale.version()
    }

    /// Register a re-render callback fired after each observed change.
    pub fn on_change(&self, callback: impl Fn(&str) + 'static) -> Subscription {
        self.locale.subscribe(move |code: &Locale| callback(code))
    }

    /// A binding that re-translates `key` with `params` on every read.
    pub fn bind<K, V>(
        &self,
        key: impl Into<String>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Binding<String>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = self.store.clone();
        let key = key.into();
        let params: Vec<(String, String)> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Binding::new(move || {
            let borrowed: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            store.translate(&key, &borrowed)
        })
    }

    /// A binding over the observed locale code, mapped by `map`.
    pub fn bind_locale<T: 'static>(&self, map: impl Fn(&str) -> T + 'static) -> Binding<T> {
        bind_mapped(&self.locale, move |code: &Locale| map(code))
    }

    /// Whether the store subscription is still registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Remove the store subscription now (view teardown).
    ///
    /// The local state stops updating; `translate` keeps delegating to the
    /// store.
    pub fn detach(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
            tracing::trace!(locale = %self.locale.get(), "translator detached");
        }
    }

    #[must_use]
    pub fn store(&self) -> &LocaleStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::FixedLocale;
    use parla_i18n::{LocaleStrings, LocaleTable};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn store() -> LocaleStore {
        let table = LocaleTable::builder()
            .locale(
                "en",
                LocaleStrings::from_iter([("greet", "Hi {{name}}"), ("chat.title", "Chats")]),
            )
            .locale("it", LocaleStrings::from_iter([("greet", "Ciao {{name}}")]))
            .build()
            .unwrap();
        LocaleStore::new(table, &FixedLocale::new("en"))
    }

    #[test]
    fn captures_current_locale() {
        let s = store();
        s.set_active_locale("it");
        let t = Translator::new(&s);
        assert_eq!(t.locale(), "it");
        assert_eq!(t.version(), 0);
        assert!(t.is_attached());
    }

    #[test]
    fn state_follows_store() {
        let s = store();
        let t = Translator::new(&s);
        s.set_active_locale("it");
        assert_eq!(t.locale(), "it");
        assert_eq!(t.version(), 1);

        s.set_active_locale("it");
        assert_eq!(t.version(), 1);
    }

    #[test]
    fn translate_is_never_cached() {
        let s = store();
        let t = Translator::new(&s);
        assert_eq!(t.translate("greet", &[("name", "Ana")]), "Hi Ana");
        s.set_active_locale("it");
        assert_eq!(t.translate("greet", &[("name", "Ana")]), "Ciao Ana");
        assert_eq!(t.translate("chat.title", &[]), "Chats");
    }

    #[test]
    fn on_change_fires_once_per_change() {
        let s = store();
        let t = Translator::new(&s);
        let renders = Rc::new(RefCell::new(Vec::new()));
        let r = Rc::clone(&renders);
        let _trigger = t.on_change(move |code| r.borrow_mut().push(code.to_string()));

        s.set_active_locale("it");
        s.set_active_locale("xx");
        s.set_active_locale("it");
        s.set_active_locale("en");
        assert_eq!(*renders.borrow(), vec!["it", "en"]);
    }

    #[test]
    fn drop_removes_store_subscription() {
        let s = store();
        assert_eq!(s.subscriber_count(), 0);
        {
            let _a = Translator::new(&s);
            let _b = Translator::new(&s);
            assert_eq!(s.subscriber_count(), 2);
        }
        assert_eq!(s.subscriber_count(), 0);
    }

    #[test]
    fn remounting_views_does_not_grow_store() {
        let s = store();
        let _header = Translator::new(&s);
        for i in 0..1_000 {
            let mut view = Translator::new(&s);
            if i % 2 == 0 {
                view.detach();
            }
        }
        assert_eq!(s.subscriber_entries(), 1);
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn detach_freezes_local_state() {
        let s = store();
        let mut t = Translator::new(&s);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _trigger = t.on_change(move |_| h.set(h.get() + 1));

        t.detach();
        assert!(!t.is_attached());
        assert_eq!(s.subscriber_count(), 0);

        s.set_active_locale("it");
        assert_eq!(hits.get(), 0);
        assert_eq!(t.locale(), "en");
        // Lookups still reflect the store.
        assert_eq!(t.translate("greet", &[("name", "Ana")]), "Ciao Ana");

        t.detach();
    }

    #[test]
    fn bindings_re_evaluate() {
        let s = store();
        let t = Translator::new(&s);
        let greet = t.bind("greet", [("name", "Ana")]);
        let badge = t.bind_locale(str::to_uppercase);
        assert_eq!(greet.get(), "Hi Ana");
        assert_eq!(badge.get(), "EN");

        s.set_active_locale("it");
        assert_eq!(greet.get(), "Ciao Ana");
        assert_eq!(badge.get(), "IT");
    }
}
