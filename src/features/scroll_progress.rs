use crate::config::ProgressConfig;
use crate::dom::{ElementFactory, ElementHandle};
use crate::error::EnhanceError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// Percentage of the scrollable height already scrolled, in `[0, 100]`.
pub fn progress_percent(metrics: ScrollMetrics) -> f64 {
    let track = metrics.scroll_height - metrics.viewport_height;
    if track > 0.0 {
        (metrics.scroll_top / track * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub struct ScrollProgress<E> {
    bar: E,
}

impl<E: ElementHandle> ScrollProgress<E> {
    pub fn install<F>(factory: &F, parent: &E, config: &ProgressConfig) -> Result<Self, EnhanceError>
    where
        F: ElementFactory<Element = E>,
    {
        let bar = factory.create("div")?;
        bar.set_classes(&config.class);
        parent.append(&bar)?;
        Ok(Self { bar })
    }

    #[cfg(test)]
    pub fn bar(&self) -> &E {
        &self.bar
    }

    pub fn update(&self, metrics: ScrollMetrics) -> f64 {
        let percent = progress_percent(metrics);
        self.bar.set_style("width", &format!("{percent}%"));
        percent
    }
}
