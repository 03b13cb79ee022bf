use gloo_timers::callback::{Interval, Timeout};
use log::{debug, info};
use yew::prelude::*;

use super::browser;
use super::controller::{CarouselController, TimerCommand};
use super::slides::{self, ConfigLoadError, HeroImage};
use super::swipe::{SwipeDirection, SwipeTracker};
use crate::config;

pub enum HeroCarouselMsg {
    Loaded(Result<Vec<HeroImage>, ConfigLoadError>),
    GoTo(usize),
    Next,
    Prev,
    Tick,
    RestartElapsed,
    TouchStart(TouchEvent),
    TouchEnd(TouchEvent),
}

#[derive(Properties, PartialEq)]
pub struct HeroCarouselProps {
    /// Hero foreground (headline, actions). Swipes that start on it still
    /// change slides.
    #[prop_or_default]
    pub children: Children,
}

/// The hero section with its rotating backgrounds. The slides, arrows and
/// dots only appear once the configuration has loaded, and never if loading
/// fails.
pub struct HeroCarousel {
    images: Vec<HeroImage>,
    webp: bool,
    controller: Option<CarouselController>,
    rotation_timer: Option<Interval>,
    restart_timer: Option<Timeout>,
    swipe: SwipeTracker,
}

impl HeroCarousel {
    fn apply(&mut self, ctx: &Context<Self>, commands: impl IntoIterator<Item = TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::StartRotation => {
                    let link = ctx.link().clone();
                    self.rotation_timer = Some(Interval::new(config::AUTO_ROTATE_MS, move || {
                        link.send_message(HeroCarouselMsg::Tick);
                    }));
                }
                TimerCommand::StopRotation => self.rotation_timer = None,
                TimerCommand::ScheduleRestart => {
                    let link = ctx.link().clone();
                    self.restart_timer = Some(Timeout::new(config::RESTART_AFTER_IDLE_MS, move || {
                        link.send_message(HeroCarouselMsg::RestartElapsed);
                    }));
                }
                TimerCommand::CancelRestart => self.restart_timer = None,
            }
        }
    }

    /// Manual navigation: counts toward the rotation backoff, then moves.
    fn navigate(&mut self, ctx: &Context<Self>, step: impl FnOnce(&mut CarouselController)) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        let commands = controller.interact();
        step(controller);
        self.apply(ctx, commands);
        true
    }

    fn view_carousel(&self, ctx: &Context<Self>) -> Html {
        let Some(controller) = self.controller.as_ref() else {
            return html! {};
        };

        html! {
            <div class="hero-carousel">
                <div class="hero-carousel-track" id="heroCarouselTrack">
                    { for self.images.iter().enumerate().map(|(i, image)| html! {
                        <div
                            key={i}
                            class={classes!("hero-slide", controller.is_active(i).then_some("is-active"))}
                            style={format!("background-image: url('{}')", image.source(self.webp))}
                            data-alt={image.alt_text().map(str::to_string)}
                            role="img"
                            aria-label={image.label(i)}
                            aria-hidden={(!controller.is_active(i)).to_string()}
                        />
                    }) }
                </div>
                <button
                    type="button"
                    class="hero-carousel-btn prev"
                    aria-label="Previous image"
                    onclick={ctx.link().callback(|_| HeroCarouselMsg::Prev)}
                >
                    {"‹"}
                </button>
                <button
                    type="button"
                    class="hero-carousel-btn next"
                    aria-label="Next image"
                    onclick={ctx.link().callback(|_| HeroCarouselMsg::Next)}
                >
                    {"›"}
                </button>
                <div class="hero-carousel-dots" id="heroCarouselDots">
                    { for self.images.iter().enumerate().map(|(i, image)| html! {
                        <button
                            key={i}
                            type="button"
                            class={classes!("hero-dot", controller.is_active(i).then_some("is-active"))}
                            aria-label={image.label(i)}
                            aria-current={controller.is_active(i).then_some("true")}
                            onclick={ctx.link().callback(move |_| HeroCarouselMsg::GoTo(i))}
                        />
                    }) }
                </div>
            </div>
        }
    }

    fn build(&mut self, ctx: &Context<Self>, images: Vec<HeroImage>) {
        self.webp = browser::supports_webp();
        if let Some(first) = images.first() {
            browser::preload_image(first.source(self.webp));
        }
        let mut controller = CarouselController::new(images.len(), browser::prefers_reduced_motion());
        let start = controller.start();
        self.images = images;
        self.controller = Some(controller);
        self.apply(ctx, start);
    }
}

impl Component for HeroCarousel {
    type Message = HeroCarouselMsg;
    type Properties = HeroCarouselProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_future(async {
            HeroCarouselMsg::Loaded(slides::load_hero_images(config::hero_config_url()).await)
        });

        Self {
            images: Vec::new(),
            webp: false,
            controller: None,
            rotation_timer: None,
            restart_timer: None,
            swipe: SwipeTracker::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            HeroCarouselMsg::Loaded(Ok(images)) => {
                info!("Hero carousel loaded {} images", images.len());
                self.build(ctx, images);
                true
            }
            HeroCarouselMsg::Loaded(Err(e)) => {
                debug!("Hero carousel disabled: {}", e);
                false
            }
            HeroCarouselMsg::GoTo(index) => self.navigate(ctx, |c| {
                c.go_to(index as isize);
            }),
            HeroCarouselMsg::Next => self.navigate(ctx, |c| {
                c.next();
            }),
            HeroCarouselMsg::Prev => self.navigate(ctx, |c| {
                c.prev();
            }),
            HeroCarouselMsg::Tick => match self.controller.as_mut() {
                Some(controller) => {
                    controller.tick();
                    true
                }
                None => false,
            },
            HeroCarouselMsg::RestartElapsed => {
                self.restart_timer = None;
                let command = self.controller.as_mut().and_then(|c| c.restart_elapsed());
                self.apply(ctx, command);
                false
            }
            HeroCarouselMsg::TouchStart(e) => {
                let touches = e.touches();
                let first = touches
                    .get(0)
                    .map(|touch| (touch.client_x() as f64, touch.client_y() as f64));
                self.swipe.touch_start(touches.length(), first);
                false
            }
            HeroCarouselMsg::TouchEnd(e) => {
                let Some(touch) = e.changed_touches().get(0) else {
                    self.swipe.cancel();
                    return false;
                };
                match self.swipe.end(touch.client_x() as f64, touch.client_y() as f64) {
                    Some(SwipeDirection::Next) => self.navigate(ctx, |c| {
                        c.next();
                    }),
                    Some(SwipeDirection::Prev) => self.navigate(ctx, |c| {
                        c.prev();
                    }),
                    None => false,
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let ontouchstart = ctx.link().callback(HeroCarouselMsg::TouchStart);
        let ontouchend = ctx.link().callback(HeroCarouselMsg::TouchEnd);

        html! {
            <section class="hero" id="top" {ontouchstart} {ontouchend}>
                { self.view_carousel(ctx) }
                { for ctx.props().children.iter() }
            </section>
        }
    }
}
