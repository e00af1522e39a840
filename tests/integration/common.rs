//! Shared fixtures: a recording sleeper and synthetic listing documents

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use windward::fetch::Sleep;

/// Sleeper that records every requested delay and returns immediately
#[derive(Debug, Clone, Default)]
pub struct RecordingSleep {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.delays.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

/// A complete sailing listing with every extractable section present
pub fn full_sail_page(gallery_slides: usize) -> String {
    let mut slides = String::new();
    for i in 1..=gallery_slides {
        slides.push_str(&format!(
            r#"<div class="embla__slide"><img src="https://img.example/boat_{i}.jpg" alt="View {i}"></div>"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Listing</title></head>
<body>
<ul class="breadcrumb">
  <li>Home</li>
  <li>Boats</li>
  <li>Sail</li>
  <li>Sloop</li>
  <li><a href="/acme" title="Acme">Acme</a></li>
  <li>X42</li>
</ul>
<h1>2005 Acme X42</h1>
<p class="style-module_content__tmQCh style-module_content-6__CzZ47">Palma de Mallorca, Spain</p>
<div class="style-module_priceSection__wa5Pn style-module_tppPriceSection__7x-f4">
  <p>&euro;120,000 (US$128,000)</p>
</div>
<div class="details">
  <div class="style-module_boatDetails__2wKB2">
    <h3 class="style-module_title__QGET2 style-module_title-9__QvhIY">Engine</h3>
    <p class="style-module_content__tmQCh style-module_content-15__m8Mqo">Yanmar 4JH45</p>
    <h3 class="style-module_title__QGET2 style-module_title-9__QvhIY">Year</h3>
    <p class="style-module_content__tmQCh style-module_content-15__m8Mqo">2005</p>
    <h3 class="style-module_title__QGET2 style-module_title-9__QvhIY">Mystery Label</h3>
    <p class="style-module_content__tmQCh style-module_content-15__m8Mqo">ignored</p>
  </div>
</div>
<details>
  <summary>Description</summary>
  <div class="data-html-inner-wrapper">A fine
     cruising sloop.</div>
</details>
<details>
  <summary>Other Details</summary>
  <div class="data-html"><p>Sold
      as-is</p></div>
</details>
<details>
  <summary>Features</summary>
  <section class="data-details-wrapper">
    <div class="data-details-cell">
      <h4>Rigging</h4>
      <div class="data-details-cell-content">
        <span class="null">Spinnaker pole:</span>
        <span class="null">Lazy jacks</span>
      </div>
    </div>
    <div class="data-details-cell">
      <h4>Unrelated Category</h4>
      <div class="data-details-cell-content">
        <span class="null">Ignored item</span>
      </div>
    </div>
  </section>
</details>
<details>
  <summary>Propulsion</summary>
  <div class="data-details-cell-content">
    <p><span class="null">Engine Make:</span><span class="cell-content-value">Yanmar</span></p>
    <p><span class="null">Fuel Type:</span><span class="cell-content-value">Diesel</span></p>
    <p><span class="null">Unknown Field:</span><span class="cell-content-value">ignored</span></p>
  </div>
</details>
<details>
  <summary>Specifications</summary>
  <section class="data-details-wrapper">
    <div class="data-details-cell">
      <div class="data-details-cell-content">
        <p><span class="null">Beam:</span><span class="cell-content-value">4.2 m</span></p>
        <p><span class="null">Windlass:</span></p>
        <p><span class="null">Not A Spec:</span><span class="cell-content-value">ignored</span></p>
      </div>
    </div>
  </section>
</details>
<div class="style-module_listedByText__u6Ijx">Listed by</div>
<h3>Baltic Brokers</h3>
<div class="embla__container">{slides}</div>
</body>
</html>"#
    )
}

/// A sailing listing with only the breadcrumb trail, no optional sections
pub fn minimal_sail_page() -> String {
    r#"<!DOCTYPE html>
<html>
<body>
<ul class="breadcrumb">
  <li>Home</li>
  <li>Boats</li>
  <li>Sail</li>
  <li>Sloop</li>
  <li><a href="/acme" title="Acme">Acme</a></li>
  <li>X42</li>
</ul>
<h1>2005 Acme X42</h1>
</body>
</html>"#
        .to_string()
}

/// A powered-vessel listing that must be filtered out
pub fn power_page() -> String {
    r#"<!DOCTYPE html>
<html>
<body>
<ul class="breadcrumb">
  <li>Home</li>
  <li>Boats</li>
  <li>Power</li>
  <li>Motor Yacht</li>
</ul>
<h1>2010 Thunder 50</h1>
</body>
</html>"#
        .to_string()
}
