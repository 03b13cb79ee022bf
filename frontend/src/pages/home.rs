use log::debug;
use yew::prelude::*;

use crate::carousel::hero::HeroCarousel;
use crate::components::effects::{use_hero_parallax, use_reveal_on_scroll};
use crate::components::modal::Modal;
use crate::components::nav::{anchor_click, scroll_to_section, AnchorAction, Nav};
use crate::config;
use crate::contact::form::ContactForm;
use crate::pages::privacy::PrivacyPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialog {
    Contact,
    Privacy,
}

#[function_component(Home)]
pub fn home() -> Html {
    let dialog = use_state(|| None::<Dialog>);
    let hero_content = use_node_ref();

    use_reveal_on_scroll(config::REVEAL_SELECTOR);
    use_hero_parallax(hero_content.clone());

    let on_anchor = {
        let dialog = dialog.clone();
        Callback::from(move |action: AnchorAction| match action {
            AnchorAction::Ignore => {}
            AnchorAction::OpenContact => dialog.set(Some(Dialog::Contact)),
            AnchorAction::OpenPrivacy => dialog.set(Some(Dialog::Privacy)),
            AnchorAction::ScrollTo(id) => {
                debug!("scrolling to #{}", id);
                scroll_to_section(&id);
            }
        })
    };

    let close_dialog = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(None))
    };

    html! {
        <>
            <Nav on_anchor={on_anchor.clone()} />
            <main>
                <HeroCarousel>
                    <div class="hero-overlay"></div>
                    <div ref={hero_content} class="hero-content">
                        <h1>{"Guided outdoor experiences, run by local operators"}</h1>
                        <p class="hero-subtitle">
                            {"KEUB gives adventure operators one platform for bookings, crews and guests."}
                        </p>
                        <div class="hero-actions">
                            <a href="#cta" class="btn btn-primary" onclick={anchor_click("#cta", on_anchor.clone())}>
                                {"Get in touch"}
                            </a>
                            <a href="#product" class="btn btn-secondary" onclick={anchor_click("#product", on_anchor.clone())}>
                                {"See how it works"}
                            </a>
                        </div>
                    </div>
                </HeroCarousel>

                <section class="section" id="product">
                    <h2 class="section-title">{"The product"}</h2>
                    <p class="section-intro">
                        {"Scheduling, guest waivers and trip logistics live in one place, so guides spend \
                          their time on the water and on the trail."}
                    </p>
                    <div class="feature-grid">
                        <div class="product-feature">
                            <h3>{"Bookings"}</h3>
                            <p>{"Live availability across every trip and every channel."}</p>
                        </div>
                        <div class="product-feature">
                            <h3>{"Crews"}</h3>
                            <p>{"Assign guides and gear without a spreadsheet."}</p>
                        </div>
                        <div class="product-feature">
                            <h3>{"Guests"}</h3>
                            <p>{"Waivers, reminders and follow-ups sent for you."}</p>
                        </div>
                    </div>
                </section>

                <section class="section" id="experiences">
                    <h2 class="section-title">{"Experiences"}</h2>
                    <div class="feature-grid">
                        <div class="experience-card"><h3>{"Rafting"}</h3></div>
                        <div class="experience-card"><h3>{"Canyoning"}</h3></div>
                        <div class="experience-card"><h3>{"Hiking"}</h3></div>
                    </div>
                </section>

                <section class="section" id="operators">
                    <h2 class="section-title">{"For operators"}</h2>
                    <div class="operator-model">
                        <p>
                            {"Operators keep their brand and their guests. KEUB handles the software and \
                              takes a small share of each booking, nothing up front."}
                        </p>
                    </div>
                </section>

                <section class="section" id="vision">
                    <h2 class="section-title">{"Vision"}</h2>
                    <div class="vision-content">
                        <p>{"Every great outdoor day should be one tap away, wherever it happens."}</p>
                    </div>
                </section>

                <section class="section cta-section" id="cta">
                    <h2 class="section-title">{"Run trips with KEUB"}</h2>
                    <a href="#contact" class="btn btn-primary" onclick={anchor_click("#contact", on_anchor.clone())}>
                        {"Contact us"}
                    </a>
                </section>
            </main>

            <footer class="footer">
                <p>
                    {"© KEUB · "}
                    <a href={format!("mailto:{}", config::CONTACT_EMAIL)}>{ config::CONTACT_EMAIL }</a>
                    {" · "}
                    <a href="#privacy" onclick={anchor_click("#privacy", on_anchor.clone())}>{"Privacy Policy"}</a>
                </p>
            </footer>

            <Modal
                id="contact"
                title="Contact us"
                open={*dialog == Some(Dialog::Contact)}
                on_close={close_dialog.clone()}
            >
                <ContactForm />
            </Modal>
            <Modal
                id="privacy"
                title="Privacy Policy"
                open={*dialog == Some(Dialog::Privacy)}
                on_close={close_dialog}
            >
                <PrivacyPolicy />
            </Modal>

            <style>
                {r#"
body {
    margin: 0;
    font-family: 'Inter', system-ui, sans-serif;
    background: #0F1A17;
    color: #F2F5F4;
}

.sr-only {
    position: absolute;
    width: 1px;
    height: 1px;
    padding: 0;
    margin: -1px;
    overflow: hidden;
    clip: rect(0, 0, 0, 0);
    white-space: nowrap;
    border: 0;
}

.navbar {
    position: fixed;
    top: 0;
    left: 0;
    right: 0;
    z-index: 100;
    background: rgba(15, 26, 23, 0.95);
    transition: background 0.3s ease, box-shadow 0.3s ease;
}

.navbar.scrolled {
    background: rgba(15, 26, 23, 0.98);
    box-shadow: 0 2px 20px rgba(0, 0, 0, 0.1);
}

.nav-content {
    max-width: 1200px;
    margin: 0 auto;
    padding: 1rem 2rem;
    display: flex;
    align-items: center;
    justify-content: space-between;
}

.nav-logo {
    font-weight: 800;
    font-size: 1.5rem;
    color: #23DC7D;
    text-decoration: none;
}

.nav-links {
    display: flex;
    gap: 2rem;
}

.nav-link {
    color: #F2F5F4;
    text-decoration: none;
}

.mobile-menu-toggle {
    display: none;
    background: none;
    border: none;
    cursor: pointer;
}

.mobile-menu-toggle span {
    display: block;
    width: 24px;
    height: 2px;
    margin: 5px 0;
    background: #F2F5F4;
}

@media (max-width: 768px) {
    .mobile-menu-toggle {
        display: block;
    }

    .nav-links {
        display: none;
        position: absolute;
        top: 100%;
        left: 0;
        right: 0;
        flex-direction: column;
        padding: 1rem 2rem;
        background: #0F1A17;
    }

    .nav-links.active {
        display: flex;
    }
}

.hero {
    position: relative;
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    overflow: hidden;
}

.hero-carousel, .hero-carousel-track {
    position: absolute;
    inset: 0;
}

.hero-slide {
    position: absolute;
    inset: 0;
    background-size: cover;
    background-position: center;
    opacity: 0;
    transition: opacity 1s ease;
}

.hero-slide.is-active {
    opacity: 1;
}

.hero-overlay {
    position: absolute;
    inset: 0;
    background: linear-gradient(180deg, rgba(15, 26, 23, 0.4), rgba(15, 26, 23, 0.85));
    pointer-events: none;
}

.hero-content {
    position: relative;
    z-index: 2;
    max-width: 800px;
    padding: 0 2rem;
    text-align: center;
}

.hero-carousel-btn {
    position: absolute;
    top: 50%;
    z-index: 3;
    transform: translateY(-50%);
    background: rgba(15, 26, 23, 0.5);
    color: #F2F5F4;
    border: none;
    font-size: 2rem;
    padding: 0.5rem 1rem;
    cursor: pointer;
}

.hero-carousel-btn.prev { left: 1rem; }
.hero-carousel-btn.next { right: 1rem; }

.hero-carousel-dots {
    position: absolute;
    bottom: 2rem;
    left: 50%;
    z-index: 3;
    transform: translateX(-50%);
    display: flex;
    gap: 0.5rem;
}

.hero-dot {
    width: 12px;
    height: 12px;
    border-radius: 50%;
    border: 2px solid #F2F5F4;
    background: transparent;
    cursor: pointer;
}

.hero-dot.is-active {
    background: #23DC7D;
    border-color: #23DC7D;
}

@media (prefers-reduced-motion: reduce) {
    .hero-slide { transition: none; }
}

.section {
    max-width: 1100px;
    margin: 0 auto;
    padding: 6rem 2rem;
}

.feature-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 1.5rem;
}

.btn {
    display: inline-block;
    padding: 0.9rem 2rem;
    border-radius: 4px;
    font-weight: 600;
    text-decoration: none;
    cursor: pointer;
    border: none;
}

.btn-primary {
    background: #23DC7D;
    color: #0F1A17;
}

.btn-primary:disabled {
    opacity: 0.6;
    cursor: not-allowed;
}

.btn-secondary {
    border: 2px solid #F2F5F4;
    color: #F2F5F4;
}

.footer {
    padding: 2rem;
    text-align: center;
    color: #6B7C76;
}

.footer a {
    color: #23DC7D;
}

.modal {
    display: none;
    position: fixed;
    inset: 0;
    z-index: 1000;
    overflow-y: auto;
    background: rgba(0, 0, 0, 0.7);
}

.modal.open {
    display: flex;
    align-items: flex-start;
    justify-content: center;
}

.modal-content {
    position: relative;
    width: 100%;
    max-width: 600px;
    margin: 4rem 1rem;
    padding: 2.5rem;
    border-radius: 8px;
    background: #16241F;
}

.close-modal {
    position: absolute;
    top: 1rem;
    right: 1rem;
    background: none;
    border: none;
    color: #F2F5F4;
    font-size: 1.75rem;
    cursor: pointer;
}

.contact-form {
    position: relative;
}

.form-group {
    display: flex;
    flex-direction: column;
    margin-bottom: 1.25rem;
}

.form-group label {
    margin-bottom: 0.4rem;
}

.form-group input, .form-group textarea {
    padding: 0.75rem;
    border-radius: 4px;
    border: 1px solid #6B7C76;
    background: #0F1A17;
    color: #F2F5F4;
    font: inherit;
}

.form-group input[aria-invalid="true"] {
    border-color: #E5484D;
}

.error-message {
    min-height: 1.2em;
    margin-top: 0.3rem;
    color: #E5484D;
    font-size: 0.85rem;
}

.char-count {
    align-self: flex-end;
    font-size: 0.8rem;
    color: #6B7C76;
}

.char-count.warning { color: #F5A524; }
.char-count.error { color: #E5484D; }

.honeypot-field {
    position: absolute;
    left: -9999px;
    width: 1px;
    height: 1px;
    overflow: hidden;
}

.form-loading-overlay {
    display: none;
    position: absolute;
    inset: 0;
    z-index: 2;
    flex-direction: column;
    justify-content: center;
    gap: 1rem;
    padding: 2rem;
    background: rgba(22, 36, 31, 0.85);
}

.form-loading-overlay.active {
    display: flex;
}

.skeleton-line {
    height: 1rem;
    border-radius: 4px;
    background: linear-gradient(90deg, #1F302A, #2B423A, #1F302A);
    background-size: 200% 100%;
    animation: skeleton-shimmer 1.2s infinite;
}

.skeleton-line.short {
    width: 60%;
}

@keyframes skeleton-shimmer {
    from { background-position: 200% 0; }
    to { background-position: -200% 0; }
}

@keyframes form-success-rise {
    to {
        opacity: 1;
        transform: translateY(0);
    }
}

.legal-content section {
    margin-bottom: 1.5rem;
}

.legal-content h3 {
    color: #23DC7D;
}

.legal-content p, .legal-content li {
    line-height: 1.6;
    color: #C9D2CF;
}
                "#}
            </style>
        </>
    }
}
