use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, Document, Element, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Window,
};

use crate::config::EnhancerConfig;
use crate::dom;
use crate::error::EnhanceError;
use crate::features::{
    backdrop::Backdrop,
    hero_offsets::HeroOffsets,
    lightbox::Lightbox,
    nav_highlight::NavHighlighter,
    nav_toggle::NavToggle,
    reveal::{RevealAnimator, RevealOutcome},
    scroll_progress::ScrollProgress,
    side_images::SideImages,
};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;
type Installer<'a> = (&'static str, &'a dyn Fn() -> Result<(), EnhanceError>);

/// Runs every installer in order, logging failures; returns how many succeeded.
pub fn install_each(installers: &[Installer<'_>]) -> usize {
    let mut installed = 0;
    for (name, install) in installers {
        match install() {
            Ok(()) => installed += 1,
            Err(err) => warn!("{name} not installed: {err}"),
        }
    }
    installed
}

/// Runs `enhance` once the document has been parsed.
pub fn when_ready(document: &Document, enhance: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        enhance();
        return;
    }

    let mut enhance = Some(enhance);
    let on_ready = Closure::wrap(Box::new(move || {
        if let Some(enhance) = enhance.take() {
            enhance();
        }
    }) as Box<dyn FnMut()>);
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
        warn!("could not wait for DOMContentLoaded: {}", EnhanceError::from(err));
        return;
    }
    on_ready.forget();
}

pub struct PageEnhancer {
    window: Window,
    document: Document,
    config: EnhancerConfig,
}

impl PageEnhancer {
    pub fn new(config: EnhancerConfig) -> Result<Self, EnhanceError> {
        let window = web_sys::window().ok_or(EnhanceError::NoWindow)?;
        let document = window.document().ok_or(EnhanceError::NoDocument)?;
        Ok(Self {
            window,
            document,
            config,
        })
    }

    /// Installs every feature. A feature that fails is logged and skipped.
    pub fn run(&self) {
        let features: [Installer<'_>; 8] = [
            ("nav highlight", &|| self.install_nav_highlight()),
            ("reveal", &|| self.install_reveal()),
            ("lightbox", &|| self.install_lightbox()),
            ("backdrop", &|| self.install_backdrop()),
            ("scroll progress", &|| self.install_scroll_progress()),
            ("side images", &|| self.install_side_images()),
            ("nav toggle", &|| self.install_nav_toggle()),
            ("hero offsets", &|| self.install_hero_offsets()),
        ];
        let installed = install_each(&features);
        info!("Page enhancements installed: {installed} of {}", features.len());
    }

    fn body(&self) -> Result<Element, EnhanceError> {
        self.document
            .body()
            .map(Element::from)
            .ok_or(EnhanceError::MissingElement("body"))
    }

    fn install_nav_highlight(&self) -> Result<(), EnhanceError> {
        let path = self.window.location().pathname()?;
        let links = dom::query_all(&self.document, &self.config.nav.link_selector)?;
        let highlighter = NavHighlighter::new(&path, &self.config.nav);
        let marked = highlighter.apply(&links);
        debug!("page '{}': {marked} of {} nav links active", highlighter.page(), links.len());
        Ok(())
    }

    fn install_reveal(&self) -> Result<(), EnhanceError> {
        let config = &self.config.reveal;
        let elements = dom::query_all(&self.document, &config.selector)?;
        if elements.is_empty() {
            debug!("no '{}' elements, reveal skipped", config.selector);
            return Ok(());
        }

        let animator = Rc::new(RefCell::new(RevealAnimator::new(
            elements.clone(),
            config.visible_class.as_str(),
        )));
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let mut animator = animator.borrow_mut();
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                if animator.handle_entry(&target, entry.is_intersecting()) == RevealOutcome::Revealed {
                    observer.unobserve(&target);
                }
            }
            if animator.is_done() {
                observer.disconnect();
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer = intersection_observer(&callback, config.threshold)?;
        for element in &elements {
            observer.observe(element);
        }
        callback.forget();
        info!("Reveal watching {} elements", elements.len());
        Ok(())
    }

    fn install_lightbox(&self) -> Result<(), EnhanceError> {
        let config = &self.config.lightbox;
        let images = dom::query_all(&self.document, &config.selector)?;
        if images.is_empty() {
            debug!("no lightbox images, lightbox skipped");
            return Ok(());
        }

        let lightbox = Rc::new(RefCell::new(Lightbox::build(&self.document, &self.body()?, config)?));
        let (overlay, close_button) = {
            let lightbox = lightbox.borrow();
            (lightbox.overlay().clone(), lightbox.close_button().clone())
        };

        for image in &images {
            let lightbox = lightbox.clone();
            let source = image.clone();
            let on_click = Closure::wrap(Box::new(move |_: MouseEvent| {
                lightbox.borrow_mut().open_from(&source);
            }) as Box<dyn FnMut(MouseEvent)>);
            dom::listen(image, "click", on_click.as_ref().unchecked_ref(), false)?;
            on_click.forget();
        }

        let on_close = {
            let lightbox = lightbox.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                lightbox.borrow_mut().close();
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        dom::listen(&close_button, "click", on_close.as_ref().unchecked_ref(), false)?;
        on_close.forget();

        let on_backdrop = {
            let lightbox = lightbox.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
                    lightbox.borrow_mut().handle_backdrop_click(&target);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        dom::listen(&overlay, "click", on_backdrop.as_ref().unchecked_ref(), false)?;
        on_backdrop.forget();

        let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            lightbox.borrow_mut().handle_key(&event.key());
        }) as Box<dyn FnMut(KeyboardEvent)>);
        dom::listen(&self.document, "keydown", on_key.as_ref().unchecked_ref(), false)?;
        on_key.forget();

        info!("Lightbox attached to {} images", images.len());
        Ok(())
    }

    fn install_backdrop(&self) -> Result<(), EnhanceError> {
        let backdrop = Backdrop::inject(&self.document, &self.body()?, &self.config.backdrop)?;
        debug!("backdrop injected with {} orbs", backdrop.orb_count());
        Ok(())
    }

    fn install_scroll_progress(&self) -> Result<(), EnhanceError> {
        let progress = ScrollProgress::install(&self.document, &self.body()?, &self.config.progress)?;
        progress.update(dom::scroll_metrics(&self.window, &self.document));

        let window = self.window.clone();
        let document = self.document.clone();
        let on_scroll = Closure::wrap(Box::new(move || {
            progress.update(dom::scroll_metrics(&window, &document));
        }) as Box<dyn FnMut()>);
        dom::listen(&self.window, "scroll", on_scroll.as_ref().unchecked_ref(), true)?;
        on_scroll.forget();
        Ok(())
    }

    fn install_side_images(&self) -> Result<(), EnhanceError> {
        let config = &self.config.side_images;
        let images = dom::query_all(&self.document, &config.selector)?;
        let Some(side_images) = SideImages::new(images, config) else {
            debug!("no '{}' elements, side image effect skipped", config.selector);
            return Ok(());
        };
        let side_images = Rc::new(side_images);

        let on_intersect = {
            let side_images = side_images.clone();
            Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    side_images.set_visibility(&entry.target(), entry.is_intersecting());
                }
            }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
        };
        let observer = intersection_observer(&on_intersect, config.threshold)?;
        for image in side_images.images() {
            observer.observe(image);
        }
        on_intersect.forget();

        side_images.update(dom::viewport_height(&self.window));
        let window = self.window.clone();
        let count = side_images.images().len();
        let on_layout = Closure::wrap(Box::new(move || {
            side_images.update(dom::viewport_height(&window));
        }) as Box<dyn FnMut()>);
        dom::listen(&self.window, "scroll", on_layout.as_ref().unchecked_ref(), true)?;
        dom::listen(&self.window, "resize", on_layout.as_ref().unchecked_ref(), false)?;
        on_layout.forget();

        info!("Side image effect tracking {count} images");
        Ok(())
    }

    fn install_nav_toggle(&self) -> Result<(), EnhanceError> {
        let config = &self.config.nav;
        let Some(nav) = self.document.query_selector(&config.container_selector)? else {
            debug!("no '{}' element, nav toggle skipped", config.container_selector);
            return Ok(());
        };
        let list = nav.query_selector("ul")?;
        let toggle = NavToggle::install(&self.document, &nav, list.as_ref(), config)?;
        let button = toggle.button().clone();
        let toggle = Rc::new(RefCell::new(toggle));

        let on_toggle = {
            let toggle = toggle.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                let mut toggle = toggle.borrow_mut();
                toggle.toggle();
                debug!("nav expanded: {}", toggle.is_expanded());
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        dom::listen(&button, "click", on_toggle.as_ref().unchecked_ref(), false)?;
        on_toggle.forget();

        if let Some(list) = &list {
            let toggle = toggle.clone();
            let on_link = Closure::wrap(Box::new(move |event: MouseEvent| {
                if let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
                    toggle.borrow_mut().handle_list_click(&target.tag_name());
                }
            }) as Box<dyn FnMut(MouseEvent)>);
            dom::listen(list, "click", on_link.as_ref().unchecked_ref(), false)?;
            on_link.forget();
        }

        let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            toggle.borrow_mut().handle_key(&event.key());
        }) as Box<dyn FnMut(KeyboardEvent)>);
        dom::listen(&self.document, "keydown", on_key.as_ref().unchecked_ref(), false)?;
        on_key.forget();

        debug!("nav toggle installed");
        Ok(())
    }

    fn install_hero_offsets(&self) -> Result<(), EnhanceError> {
        let root = self
            .document
            .document_element()
            .ok_or(EnhanceError::MissingElement("root"))?;
        let hero = HeroOffsets::new(self.config.hero.clone());
        let offsets = hero.apply(&root, dom::viewport_height(&self.window));
        debug!("hero offsets {} / {}", offsets.left, offsets.right);

        let window = self.window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            hero.apply(&root, dom::viewport_height(&window));
        }) as Box<dyn FnMut()>);
        dom::listen(&self.window, "resize", on_resize.as_ref().unchecked_ref(), false)?;
        on_resize.forget();
        Ok(())
    }
}

fn intersection_observer(callback: &ObserverCallback, threshold: f64) -> Result<IntersectionObserver, EnhanceError> {
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    Ok(IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_feature_does_not_stop_later_ones() {
        let ran = RefCell::new(Vec::new());
        let ok = |name: &'static str| {
            let ran = &ran;
            move || {
                ran.borrow_mut().push(name);
                Ok::<(), EnhanceError>(())
            }
        };
        let first = ok("first");
        let broken = || -> Result<(), EnhanceError> {
            ran.borrow_mut().push("broken");
            Err(EnhanceError::MissingElement("body"))
        };
        let last = ok("last");

        let installed = install_each(&[("first", &first), ("broken", &broken), ("last", &last)]);

        assert_eq!(installed, 2);
        assert_eq!(*ran.borrow(), vec!["first", "broken", "last"]);
    }

    #[test]
    fn every_failure_is_counted() {
        let missing = || -> Result<(), EnhanceError> { Err(EnhanceError::NoDocument) };
        let also_missing = || -> Result<(), EnhanceError> { Err(EnhanceError::NoWindow) };

        assert_eq!(install_each(&[("a", &missing), ("b", &also_missing)]), 0);
        assert_eq!(install_each(&[]), 0);
    }
}
