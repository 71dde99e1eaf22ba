//! Page templates

pub const BASE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}{{ school }}{% endblock %}</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100 text-gray-900 min-h-screen" data-session="{{ session_key }}">
    {% if notice %}
    <div id="notice" class="fixed top-4 right-4 z-50 px-4 py-3 rounded shadow bg-red-600 text-white">{{ notice }}</div>
    <script>setTimeout(() => document.getElementById('notice').remove(), 5000);</script>
    {% endif %}
    {% block body %}{% endblock %}
    <script>
        (function() {
            const rendered = document.body.dataset.session;
            const proto = location.protocol === 'https:' ? 'wss' : 'ws';
            const ws = new WebSocket(proto + '://' + location.host + '/ws/session');
            let frames = 0;
            ws.onmessage = (event) => {
                const msg = JSON.parse(event.data);
                if (msg.type !== 'Session') return;
                frames += 1;
                // First frame is the logged-out placeholder every page starts from
                if (frames === 1) return;
                const key = msg.hasAccessToken + ':' + (msg.role || '');
                if (key !== rendered) location.reload();
            };
            setInterval(() => {
                if (ws.readyState === WebSocket.OPEN) ws.send(JSON.stringify({ type: 'Ping' }));
            }, 30000);
        })();
    </script>
</body>
</html>
"#;

pub const NAVBAR: &str = r#"<header class="sticky top-0 z-40 w-full border-b bg-white">
    <div class="container mx-auto flex h-14 items-center justify-between px-4">
        <nav class="flex items-center space-x-6 text-sm font-medium">
            <a href="/" class="font-bold">{{ school }}</a>
            <a href="/" class="text-gray-600 hover:text-gray-900">Home</a>
            <a href="/about" class="text-gray-600 hover:text-gray-900">About</a>
        </nav>
        <nav class="flex items-center space-x-2">
            {% if dashboard_href %}
            <a href="{{ dashboard_href }}" class="px-3 py-2 rounded bg-gray-900 text-white">Dashboard</a>
            {% else %}
            <a href="/login" class="px-3 py-2 rounded hover:bg-gray-200">Login</a>
            <a href="/register" class="px-3 py-2 rounded bg-gray-900 text-white">Register</a>
            {% endif %}
        </nav>
    </div>
</header>
"#;

pub const HOME: &str = r#"{% extends "base.html" %}
{% block body %}
{% include "navbar.html" %}
<main class="container mx-auto px-4 py-16 text-center">
    <h1 class="text-4xl font-bold mb-4">Welcome to {{ school }}</h1>
    <p class="text-gray-600 mb-8">Classes, timetables, attendance, exams and results in one place.</p>
    {% if dashboard_href %}
    <a href="{{ dashboard_href }}" class="px-6 py-3 rounded bg-gray-900 text-white">Go to your dashboard</a>
    {% else %}
    <a href="/login" class="px-6 py-3 rounded bg-gray-900 text-white">Sign in</a>
    {% endif %}
</main>
{% endblock %}
"#;

pub const ABOUT: &str = r#"{% extends "base.html" %}
{% block title %}About - {{ school }}{% endblock %}
{% block body %}
{% include "navbar.html" %}
<main class="container mx-auto px-4 py-16 max-w-3xl">
    <h1 class="text-3xl font-bold mb-4">About {{ school }}</h1>
    <p class="text-gray-600">Administrators manage users, classes, subjects and timetables. Teachers record
    attendance, run exams, publish results and share learning materials. Students follow their classes,
    attendance and results.</p>
</main>
{% endblock %}
"#;

pub const LOGIN: &str = r#"{% extends "base.html" %}
{% block title %}Login - {{ school }}{% endblock %}
{% block body %}
<div class="flex items-center justify-center min-h-screen">
    <form id="login-form" class="w-full max-w-md bg-white rounded-lg shadow p-8 space-y-6">
        <h1 class="text-2xl font-semibold">Login</h1>
        <label class="block">
            <span class="text-sm font-medium">Email</span>
            <input name="email" type="email" required placeholder="your.email@example.com"
                   class="mt-1 w-full px-3 py-2 border rounded">
        </label>
        <label class="block">
            <span class="text-sm font-medium">Password</span>
            <input name="password" type="password" required placeholder="Your password"
                   class="mt-1 w-full px-3 py-2 border rounded">
        </label>
        <p id="login-error" class="hidden text-sm text-red-600"></p>
        <button type="submit" class="w-full px-4 py-2 rounded bg-gray-900 text-white">Login</button>
        <p class="text-sm text-center">No account? <a href="/register" class="underline">Register</a></p>
    </form>
</div>
<script>
    document.getElementById('login-form').addEventListener('submit', async (event) => {
        event.preventDefault();
        const form = event.target;
        const button = form.querySelector('button');
        const error = document.getElementById('login-error');
        button.disabled = true;
        button.textContent = 'Logging in...';
        error.classList.add('hidden');
        try {
            const res = await fetch('/api/auth/login', {
                method: 'POST',
                credentials: 'same-origin',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ email: form.email.value, password: form.password.value }),
            });
            if (res.ok) {
                // The guard sends an authenticated visitor of /login to their dashboard
                location.href = '/login';
                return;
            }
            error.textContent = (res.status === 400 || res.status === 401)
                ? 'Invalid email or password. Please try again.'
                : 'An unexpected error occurred. Please try again later.';
        } catch (e) {
            error.textContent = 'An unexpected error occurred. Please try again later.';
        }
        error.classList.remove('hidden');
        button.disabled = false;
        button.textContent = 'Login';
    });
</script>
{% endblock %}
"#;

pub const REGISTER: &str = r#"{% extends "base.html" %}
{% block title %}Register - {{ school }}{% endblock %}
{% block body %}
<div class="flex items-center justify-center min-h-screen">
    <form id="register-form" class="w-full max-w-md bg-white rounded-lg shadow p-8 space-y-6">
        <h1 class="text-2xl font-semibold">Register</h1>
        <label class="block">
            <span class="text-sm font-medium">Full name</span>
            <input name="name" required class="mt-1 w-full px-3 py-2 border rounded">
        </label>
        <label class="block">
            <span class="text-sm font-medium">Email</span>
            <input name="email" type="email" required class="mt-1 w-full px-3 py-2 border rounded">
        </label>
        <label class="block">
            <span class="text-sm font-medium">Password</span>
            <input name="password" type="password" required minlength="6" class="mt-1 w-full px-3 py-2 border rounded">
        </label>
        <p id="register-status" class="hidden text-sm"></p>
        <button type="submit" class="w-full px-4 py-2 rounded bg-gray-900 text-white">Register</button>
        <p class="text-sm text-center">Already registered? <a href="/login" class="underline">Login</a></p>
    </form>
</div>
<script>
    document.getElementById('register-form').addEventListener('submit', async (event) => {
        event.preventDefault();
        const form = event.target;
        const status = document.getElementById('register-status');
        const res = await fetch('/api/auth/register', {
            method: 'POST',
            credentials: 'same-origin',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({ name: form.elements['name'].value, email: form.email.value, password: form.password.value }),
        }).catch(() => null);
        status.classList.remove('hidden');
        if (res && res.ok) {
            status.className = 'text-sm text-green-700';
            status.textContent = 'Account created. You can now log in.';
            setTimeout(() => { location.href = '/login'; }, 1000);
        } else {
            status.className = 'text-sm text-red-600';
            status.textContent = 'Registration failed. Please check your details.';
        }
    });
</script>
{% endblock %}
"#;

pub const DASHBOARD: &str = r#"{% extends "base.html" %}
{% block title %}{{ title }} - {{ school }}{% endblock %}
{% block body %}
<div class="flex min-h-screen">
    <aside class="hidden md:flex md:flex-col md:w-64 border-r bg-white">
        <div class="flex items-center justify-center h-16 border-b font-bold">{{ school }}</div>
        <nav class="flex-1 p-4 flex flex-col space-y-2">
            {% for item in menu %}
            <a href="{{ item.href }}"
               class="px-3 py-2 rounded {% if item.href == active %}bg-gray-200 font-semibold{% else %}hover:bg-gray-100{% endif %}">{{ item.name }}</a>
            {% endfor %}
        </nav>
        <div class="p-4 border-t">
            <button id="logout" class="w-full px-3 py-2 border rounded hover:bg-gray-100">Logout</button>
        </div>
    </aside>
    <main class="flex-1 p-8">
        <h1 class="text-3xl font-bold mb-8">{{ title }}</h1>
        {% if report %}
        <div class="grid gap-8 md:grid-cols-2 lg:grid-cols-3">
            {% for card in report %}
            <div class="bg-white rounded-lg shadow p-6">
                <div class="text-sm font-medium text-gray-500">{{ card.label }}</div>
                <div class="text-2xl font-bold">{{ card.value }}</div>
            </div>
            {% endfor %}
        </div>
        {% else %}
        <div id="page-root" data-role="{{ role }}" data-path="{{ active }}"></div>
        {% endif %}
    </main>
</div>
<script>
    document.getElementById('logout').addEventListener('click', async () => {
        const res = await fetch('/api/auth/logout', { method: 'POST', credentials: 'same-origin' })
            .catch(() => null);
        if (res && res.ok) {
            location.href = '/login';
        } else {
            alert('Logout failed. Please try again.');
        }
    });
</script>
{% endblock %}
"#;

pub const NOT_FOUND: &str = r#"{% extends "base.html" %}
{% block title %}Not found - {{ school }}{% endblock %}
{% block body %}
{% include "navbar.html" %}
<main class="container mx-auto px-4 py-16 text-center">
    <h1 class="text-3xl font-bold mb-4">Page not found</h1>
    <a href="/" class="underline">Back home</a>
</main>
{% endblock %}
"#;
