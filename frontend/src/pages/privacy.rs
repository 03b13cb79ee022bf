use yew::prelude::*;

use crate::config;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    html! {
        <div class="legal-content privacy-policy">
            <section>
                <h3>{"1. What we collect"}</h3>
                <p>{"When you use the contact form we receive the details you type in:"}</p>
                <ul>
                    <li>{"Name and email address (required, so we can reply)"}</li>
                    <li>{"Phone number, organization and location (optional)"}</li>
                    <li>{"Your message"}</li>
                </ul>
            </section>

            <section>
                <h3>{"2. How it is sent"}</h3>
                <p>
                    {"Form submissions are delivered to our inbox through EmailJS, a transactional email \
                      service. We do not run our own servers for this site and keep no database of \
                      visitors."}
                </p>
            </section>

            <section>
                <h3>{"3. What stays in your browser"}</h3>
                <p>
                    {"While you type, an unsent draft of the form is kept in your browser's local storage \
                      so it survives a reload. It never leaves your device until you press send, and it is \
                      deleted after a successful submission. Clearing your browser's site data removes it \
                      at any time."}
                </p>
            </section>

            <section>
                <h3>{"4. Your rights"}</h3>
                <p>{"You can ask us to see, correct or delete anything you have sent us."}</p>
            </section>

            <section>
                <h3>{"5. Contact"}</h3>
                <p>
                    {"Questions about this policy: "}
                    <a href={format!("mailto:{}", config::CONTACT_EMAIL)}>{ config::CONTACT_EMAIL }</a>
                </p>
            </section>
        </div>
    }
}
