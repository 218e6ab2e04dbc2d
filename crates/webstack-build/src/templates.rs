//! Template engine for rendering a WebStack navigation page.

use minijinja::{context, Environment};

use webstack_gen::{NavigationCategory, SiteConfig};

/// Template engine using minijinja.
///
/// Templates are registered under `.html` names, so every interpolated value
/// is HTML-escaped.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("index.html", INDEX_TEMPLATE)?;
        env.add_template("sidebar.html", SIDEBAR_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Render the site's home page.
    pub fn render_index(
        &self,
        config: &SiteConfig,
        categories: &[NavigationCategory],
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            site => config,
            params => &config.params,
            categories => categories,
        })
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ site.languageCode }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="author" content="{{ params.author }}">
  <meta name="description" content="{{ params.description }}">
  <title>{{ site.title }}</title>
  <base href="{{ site.baseURL }}">
</head>
<body class="{% if params.nightMode %}io-black-mode{% endif %}">
  <div class="page-container">
    <div class="sidebar-menu{% if params.expandSidebar %} expanded{% endif %}">
      {% include "sidebar.html" %}
    </div>
    <div class="main-content">
      {% block content %}{% endblock %}
      <footer class="main-footer">
        <div class="footer-inner">&copy; {{ params.author }} | {{ site.title }}</div>
      </footer>
    </div>
  </div>
</body>
</html>"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{% for category in categories %}
<h4 class="text-gray" id="{{ category.taxonomy }}">
  <i class="{{ category.icon }}"></i>
  {{ category.taxonomy }}
</h4>
<div class="row">
  {% for link in category.links %}
  <div class="url-card">
    <a href="{{ link.url }}" title="{{ link.description }}">
      <img src="{{ params.logosPath }}/{{ link.logo }}" alt="{{ link.title }}">
      <strong>{{ link.title }}</strong>
      <p class="overflowClip_1">{{ link.description }}</p>
    </a>
  </div>
  {% endfor %}
</div>
{% endfor %}
{% endblock %}"##;

const SIDEBAR_TEMPLATE: &str = r##"<div class="sidebar-menu-inner">
  <a href="{{ site.baseURL }}" class="logo-expanded">{{ site.title }}</a>
  <ul class="main-menu">
  {% for category in categories %}
    <li>
      <a href="#{{ category.taxonomy }}">
        <i class="{{ category.icon }}"></i>
        <span class="title">{{ category.taxonomy }}</span>
      </a>
    </li>
  {% endfor %}
  </ul>
</div>"##;
