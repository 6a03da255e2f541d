//! JavaScript injected into pages.

/// Attribute carrying an element's snapshot index.
pub const INDEX_ATTR: &str = "data-webpilot-index";

/// Upper bound on indexed elements per snapshot.
pub const MAX_ELEMENTS: usize = 200;

/// Page text handed to extraction is cut at this many characters.
pub const MAX_TEXT_CHARS: usize = 12_000;

/// Index visible interactive elements and describe them.
///
/// Returns `JSON.stringify({url, title, elements})`.
pub const SNAPSHOT: &str = r#"(() => {
    const MAX = 200;
    const ATTR = 'data-webpilot-index';
    const selector = [
        'a[href]', 'button', 'input:not([type="hidden"])', 'textarea', 'select', 'summary',
        '[role="button"]', '[role="link"]', '[role="checkbox"]', '[role="radio"]',
        '[role="tab"]', '[role="menuitem"]', '[role="option"]', '[role="textbox"]',
        '[role="combobox"]', '[contenteditable="true"]', '[onclick]'
    ].join(',');
    document.querySelectorAll('[' + ATTR + ']').forEach(el => el.removeAttribute(ATTR));
    const elements = [];
    for (const el of document.querySelectorAll(selector)) {
        if (elements.length >= MAX) break;
        const rect = el.getBoundingClientRect();
        if (rect.width === 0 || rect.height === 0) continue;
        const style = window.getComputedStyle(el);
        if (style.visibility === 'hidden' || style.display === 'none') continue;
        const index = elements.length;
        el.setAttribute(ATTR, String(index));
        const label = el.innerText || el.value || el.getAttribute('aria-label')
            || el.getAttribute('placeholder') || el.getAttribute('title') || el.getAttribute('name') || '';
        elements.push({
            index,
            tag: el.tagName.toLowerCase(),
            type: el.getAttribute('type'),
            role: el.getAttribute('role'),
            text: label.trim().replace(/\s+/g, ' ').slice(0, 80),
            href: el.getAttribute('href'),
            x: Math.round(rect.x),
            y: Math.round(rect.y),
            width: Math.round(rect.width),
            height: Math.round(rect.height)
        });
    }
    return JSON.stringify({url: location.href, title: document.title, elements});
})()"#;

/// Visible text of the page, whitespace-collapsed.
pub const PAGE_TEXT: &str = r#"(() => {
    const body = document.body;
    if (!body) return '';
    return body.innerText.replace(/[ \t]+/g, ' ').replace(/\n\s*\n+/g, '\n').trim().slice(0, 12000);
})()"#;

/// CSS selector of an indexed element.
pub fn element_selector(index: u32) -> String {
    format!("[{}=\"{}\"]", INDEX_ATTR, index)
}

/// Scroll the element into view and return `JSON.stringify({x, y})` of its
/// center, or `null` when it is gone.
pub fn element_center(index: u32) -> String {
    format!(
        r#"(() => {{
    const el = document.querySelector('{selector}');
    if (!el) return null;
    el.scrollIntoView({{block: 'center', inline: 'center'}});
    const r = el.getBoundingClientRect();
    return JSON.stringify({{x: r.x + r.width / 2, y: r.y + r.height / 2}});
}})()"#,
        selector = element_selector(index)
    )
}

/// Replace the value of an input, textarea or contenteditable element.
/// Evaluates to `true` on success.
pub fn fill_element(index: u32, value: &str) -> String {
    format!(
        r#"(() => {{
    const el = document.querySelector('{selector}');
    if (!el) return false;
    el.focus();
    if (el.isContentEditable) {{
        el.textContent = {value};
    }} else {{
        const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
        const setter = Object.getOwnPropertyDescriptor(proto, 'value');
        if (setter && setter.set) setter.set.call(el, {value}); else el.value = {value};
    }}
    el.dispatchEvent(new Event('input', {{bubbles: true}}));
    el.dispatchEvent(new Event('change', {{bubbles: true}}));
    return true;
}})()"#,
        selector = element_selector(index),
        value = js_string(value)
    )
}

/// Pick the `<option>` whose value or label matches. Evaluates to `true` on success.
pub fn select_option(index: u32, value: &str) -> String {
    format!(
        r#"(() => {{
    const el = document.querySelector('{selector}');
    if (!el || !el.options) return false;
    const wanted = {value};
    const opt = Array.from(el.options).find(o => o.value === wanted || o.text.trim() === wanted);
    if (!opt) return false;
    el.value = opt.value;
    el.dispatchEvent(new Event('input', {{bubbles: true}}));
    el.dispatchEvent(new Event('change', {{bubbles: true}}));
    return true;
}})()"#,
        selector = element_selector(index),
        value = js_string(value)
    )
}

/// Quote `value` as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    // JSON string syntax is a subset of JS, bar these two separators.
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
