use chrono::NaiveDate;

pub fn render_index(today: NaiveDate, streak: u32) -> String {
    let unit = if streak == 1 { "day" } else { "days" };
    INDEX_HTML
        .replace("{{TODAY}}", &today.format("%A, %B %-d, %Y").to_string())
        .replace("{{STREAK}}", &streak.to_string())
        .replace("{{STREAK_UNIT}}", unit)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>My Journal</title>
  <style>
    :root {
      --bg-1: #d4d4d4;
      --bg-2: #a3a3a3;
      --ink: #111111;
      --muted: #555555;
      --card: #e5e5e5;
      --card-hover: #ffffff;
      --danger: #c63b2b;
      --radius: 12px;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2) 50%, var(--bg-1));
      color: var(--ink);
      font-family: "Helvetica Neue", "Trebuchet MS", sans-serif;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 28px 20px 48px;
      display: grid;
      gap: 24px;
    }

    header {
      display: grid;
      gap: 18px;
      animation: fade-in 500ms ease-out;
    }

    .brand {
      display: flex;
      align-items: center;
      gap: 16px;
    }

    .logo {
      background: var(--ink);
      color: white;
      border-radius: 999px;
      width: 56px;
      height: 56px;
      display: grid;
      place-items: center;
      font-size: 1.8rem;
      animation: float 3s ease-in-out infinite;
    }

    h1 {
      margin: 0;
      font-size: clamp(2.2rem, 5vw, 3rem);
      letter-spacing: -0.02em;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      gap: 12px;
    }

    .toolbar .group {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .badge {
      display: inline-flex;
      align-items: center;
      gap: 8px;
      padding: 8px 16px;
      border-radius: 10px;
      border: 2px solid var(--ink);
      background: var(--ink);
      color: white;
      font-weight: 600;
    }

    button {
      appearance: none;
      border: 2px solid var(--ink);
      border-radius: 10px;
      padding: 8px 16px;
      font-size: 0.95rem;
      font-weight: 600;
      cursor: pointer;
      background: white;
      color: var(--ink);
      transition: transform 150ms ease, background 150ms ease, color 150ms ease;
    }

    button:hover {
      transform: scale(1.04);
    }

    button.primary,
    button.active {
      background: var(--ink);
      color: white;
    }

    .card {
      background: var(--card);
      border: 2px solid var(--ink);
      border-radius: var(--radius);
      overflow: hidden;
      transition: background 200ms ease;
      animation: fade-in 400ms ease-out;
    }

    .card:hover {
      background: var(--card-hover);
    }

    .editor {
      padding: 22px;
      display: grid;
      gap: 14px;
    }

    .editor input[type="text"],
    .editor textarea {
      width: 100%;
      padding: 12px;
      border: 2px solid var(--ink);
      border-radius: 8px;
      font: inherit;
      background: white;
    }

    .editor textarea {
      min-height: 130px;
      resize: vertical;
    }

    .moods {
      display: flex;
      gap: 10px;
    }

    .moods button {
      font-size: 1.4rem;
      padding: 8px 12px;
    }

    .photo-drop {
      display: flex;
      justify-content: center;
      padding: 16px;
      border: 2px dashed var(--ink);
      border-radius: 8px;
      cursor: pointer;
      background: #f3f3f3;
    }

    .photo-preview {
      max-height: 260px;
      border-radius: 8px;
      border: 2px solid var(--ink);
      object-fit: cover;
    }

    .timeline {
      display: grid;
      gap: 20px;
    }

    .entry img {
      width: 100%;
      height: 260px;
      object-fit: cover;
      display: block;
    }

    .entry .body {
      padding: 20px;
      display: grid;
      gap: 10px;
    }

    .entry .head {
      display: flex;
      justify-content: space-between;
      align-items: flex-start;
      gap: 12px;
    }

    .entry h3 {
      margin: 0;
      font-size: 1.5rem;
    }

    .entry .meta {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .entry p {
      margin: 0;
      white-space: pre-wrap;
    }

    .entry .delete {
      border: none;
      background: transparent;
      color: var(--muted);
      font-size: 1.2rem;
      padding: 2px 6px;
    }

    .entry .delete:hover {
      color: var(--danger);
    }

    .empty {
      text-align: center;
      padding: 48px 0;
      color: var(--muted);
      font-size: 1.1rem;
    }

    .calendar {
      padding: 22px;
    }

    .calendar-nav {
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 18px;
    }

    .calendar-nav h2 {
      margin: 0;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
    }

    .weekday {
      text-align: center;
      font-weight: 600;
      color: var(--muted);
      font-size: 0.85rem;
      padding: 6px 0;
    }

    .cell {
      aspect-ratio: 1;
      border: 1px solid #9a9a9a;
      border-radius: 6px;
      padding: 6px;
      background: var(--card);
      display: grid;
      grid-template-rows: auto 1fr;
      gap: 4px;
      overflow: hidden;
    }

    .cell.today {
      background: #cfcfcf;
      border-color: var(--ink);
    }

    .cell .day {
      font-weight: 600;
      font-size: 0.85rem;
    }

    .thumbs {
      display: grid;
      grid-template-columns: repeat(2, 1fr);
      gap: 3px;
    }

    .thumb {
      height: 34px;
      border-radius: 4px;
      border: 1px solid #777777;
      background: linear-gradient(135deg, #d0d0d0, #a8a8a8);
      display: grid;
      place-items: center;
      overflow: hidden;
      font-size: 0.9rem;
    }

    .thumb img {
      width: 100%;
      height: 100%;
      object-fit: cover;
    }

    .status {
      min-height: 1.2em;
      color: var(--muted);
    }

    .status[data-type="error"] {
      color: var(--danger);
    }

    .hidden {
      display: none !important;
    }

    @keyframes fade-in {
      from {
        opacity: 0;
        transform: translateY(16px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @keyframes float {
      0%, 100% {
        transform: translateY(0);
      }
      50% {
        transform: translateY(-8px);
      }
    }

    @media (max-width: 640px) {
      .cell {
        aspect-ratio: auto;
        min-height: 64px;
      }
      .thumb {
        height: 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div class="brand">
        <div class="logo">🐈</div>
        <div>
          <h1>My Journal</h1>
          <p class="subtitle">Capture your moments, one entry at a time &middot; {{TODAY}}</p>
        </div>
      </div>

      <div class="toolbar">
        <div class="group">
          <span class="badge">🔥 <span id="streak">{{STREAK}}</span> <span id="streak-unit">{{STREAK_UNIT}}</span></span>
          <button type="button" id="notify-btn">🔔 Reminders</button>
        </div>
        <div class="group" role="tablist">
          <button type="button" class="tab active" data-view="timeline">Timeline</button>
          <button type="button" class="tab" data-view="calendar">Calendar</button>
          <button type="button" class="primary" id="new-btn">＋ New Entry</button>
        </div>
      </div>
    </header>

    <div class="status" id="status"></div>

    <section id="timeline-view" class="timeline-view">
      <form id="editor" class="card editor hidden">
        <input type="text" id="title" placeholder="Entry title..." autocomplete="off" />
        <textarea id="content" placeholder="What's on your mind today?"></textarea>
        <div>
          <div class="subtitle">How are you feeling?</div>
          <div class="moods" id="moods">
            <button type="button" data-mood="happy" title="happy">😊</button>
            <button type="button" data-mood="neutral" class="active" title="neutral">😐</button>
            <button type="button" data-mood="sad" title="sad">☹️</button>
            <button type="button" data-mood="love" title="love">❤️</button>
          </div>
        </div>
        <div>
          <div class="subtitle">Add a photo</div>
          <input type="file" id="photo" accept="image/*" class="hidden" />
          <label for="photo" class="photo-drop">📷 Choose a photo</label>
          <img id="photo-preview" class="photo-preview hidden" alt="Preview" />
        </div>
        <button type="submit" class="primary">Save Entry</button>
      </form>

      <div class="timeline" id="timeline"></div>
      <div class="empty hidden" id="empty">📷<br />No entries yet. Start journaling!</div>
    </section>

    <section id="calendar-view" class="card calendar hidden">
      <div class="calendar-nav">
        <button type="button" id="prev-month" aria-label="Previous month">‹</button>
        <h2 id="month-label"></h2>
        <button type="button" id="next-month" aria-label="Next month">›</button>
      </div>
      <div class="grid" id="weekdays"></div>
      <div class="grid" id="calendar-grid"></div>
    </section>
  </main>

  <script>
    const MOOD_ICONS = { happy: '😊', neutral: '😐', sad: '☹️', love: '❤️' };
    const WEEKDAYS = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];
    const REMINDER_POLL_MS = 5 * 60 * 1000;

    const statusEl = document.getElementById('status');
    const streakEl = document.getElementById('streak');
    const streakUnitEl = document.getElementById('streak-unit');
    const timelineEl = document.getElementById('timeline');
    const emptyEl = document.getElementById('empty');
    const editorEl = document.getElementById('editor');
    const titleEl = document.getElementById('title');
    const contentEl = document.getElementById('content');
    const photoEl = document.getElementById('photo');
    const previewEl = document.getElementById('photo-preview');
    const monthLabelEl = document.getElementById('month-label');
    const gridEl = document.getElementById('calendar-grid');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const moodButtons = Array.from(document.querySelectorAll('#moods button'));

    const app = {
      entries: [],
      view: 'timeline',
      month: null,
      draft: { mood: 'neutral', photo: null }
    };

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const setStreak = (streak) => {
      streakEl.textContent = streak;
      streakUnitEl.textContent = streak === 1 ? 'day' : 'days';
    };

    const formatDate = (iso) =>
      new Date(iso).toLocaleDateString('en-US', {
        weekday: 'long',
        year: 'numeric',
        month: 'long',
        day: 'numeric'
      });

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.status === 204 ? null : res.json();
    };

    const el = (tag, className, text) => {
      const node = document.createElement(tag);
      if (className) {
        node.className = className;
      }
      if (text !== undefined) {
        node.textContent = text;
      }
      return node;
    };

    const renderTimeline = () => {
      timelineEl.replaceChildren();
      app.entries.forEach((entry) => {
        const card = el('article', 'card entry');
        if (entry.photo) {
          const img = el('img');
          img.src = entry.photo;
          img.alt = entry.title;
          card.appendChild(img);
        }
        const body = el('div', 'body');
        const head = el('div', 'head');
        head.appendChild(el('h3', '', entry.title));
        const actions = el('div');
        actions.appendChild(el('span', '', MOOD_ICONS[entry.mood] || MOOD_ICONS.neutral));
        const del = el('button', 'delete', '✕');
        del.type = 'button';
        del.title = 'Delete entry';
        del.addEventListener('click', () => {
          deleteEntry(entry.id).catch((err) => setStatus(err.message, 'error'));
        });
        actions.appendChild(del);
        head.appendChild(actions);
        body.appendChild(head);
        body.appendChild(el('div', 'meta', '📅 ' + formatDate(entry.date)));
        body.appendChild(el('p', '', entry.content));
        card.appendChild(body);
        timelineEl.appendChild(card);
      });
      const editorOpen = !editorEl.classList.contains('hidden');
      emptyEl.classList.toggle('hidden', app.entries.length > 0 || editorOpen);
    };

    const renderCalendar = (data) => {
      app.month = { year: data.year, month: data.month, previous: data.previous, next: data.next };
      monthLabelEl.textContent = data.label;
      gridEl.replaceChildren();
      for (let i = 0; i < data.leading_blanks; i += 1) {
        gridEl.appendChild(el('div'));
      }
      data.cells.forEach((cell) => {
        const node = el('div', cell.is_today ? 'cell today' : 'cell');
        node.appendChild(el('div', 'day', cell.day));
        if (cell.entry_count > 0) {
          const thumbs = el('div', 'thumbs');
          cell.preview.forEach((thumb) => {
            const box = el('div', 'thumb');
            box.title = thumb.title;
            if (thumb.photo) {
              const img = el('img');
              img.src = thumb.photo;
              img.alt = thumb.title;
              box.appendChild(img);
            } else {
              box.textContent = MOOD_ICONS[thumb.mood] || MOOD_ICONS.neutral;
            }
            thumbs.appendChild(box);
          });
          if (cell.overflow > 0) {
            thumbs.appendChild(el('div', 'thumb', '+' + cell.overflow));
          }
          node.appendChild(thumbs);
        }
        gridEl.appendChild(node);
      });
    };

    const loadEntries = async () => {
      const data = await request('/api/entries');
      app.entries = data.entries;
      setStreak(data.streak);
      renderTimeline();
    };

    const loadCalendar = async (month) => {
      const query = month ? `?year=${month.year}&month=${month.month}` : '';
      renderCalendar(await request('/api/calendar' + query));
    };

    const resetDraft = () => {
      app.draft = { mood: 'neutral', photo: null };
      editorEl.reset();
      previewEl.classList.add('hidden');
      previewEl.removeAttribute('src');
      setMood('neutral');
    };

    const setMood = (mood) => {
      app.draft.mood = mood;
      moodButtons.forEach((button) => {
        button.classList.toggle('active', button.dataset.mood === mood);
      });
    };

    const saveEntry = async () => {
      const title = titleEl.value;
      const content = contentEl.value;
      if (!title.trim() || !content.trim()) {
        setStatus('Please fill in both title and content', 'error');
        return;
      }
      setStatus('Saving...', 'info');
      const saved = await request('/api/entries', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({
          title,
          content,
          mood: app.draft.mood,
          photo: app.draft.photo
        })
      });
      app.entries = [saved.entry, ...app.entries.filter((entry) => entry.id !== saved.entry.id)];
      setStreak(saved.streak);
      resetDraft();
      editorEl.classList.add('hidden');
      renderTimeline();
      setStatus('Saved', 'ok');
      setTimeout(() => setStatus('', ''), 1200);
    };

    const deleteEntry = async (id) => {
      const data = await request(`/api/entries/${encodeURIComponent(id)}`, { method: 'DELETE' });
      app.entries = app.entries.filter((entry) => entry.id !== id);
      setStreak(data.streak);
      renderTimeline();
    };

    const setView = (view) => {
      app.view = view;
      tabs.forEach((button) => button.classList.toggle('active', button.dataset.view === view));
      document.getElementById('timeline-view').classList.toggle('hidden', view !== 'timeline');
      document.getElementById('calendar-view').classList.toggle('hidden', view !== 'calendar');
      if (view === 'calendar') {
        loadCalendar(app.month).catch((err) => setStatus(err.message, 'error'));
      }
    };

    const reportPermission = async (permission) => {
      await request('/api/notifications/permission', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ permission })
      });
    };

    const requestPermission = async () => {
      if (!('Notification' in window)) {
        return 'denied';
      }
      let permission = Notification.permission;
      if (permission === 'default') {
        permission = await Notification.requestPermission();
      }
      await reportPermission(permission);
      return permission;
    };

    const pollReminder = async () => {
      if (!('Notification' in window) || Notification.permission !== 'granted') {
        return;
      }
      const reminder = await request('/api/reminder');
      if (reminder) {
        new Notification(reminder.title, { body: reminder.body, tag: reminder.tag });
      }
    };

    WEEKDAYS.forEach((day) => {
      document.getElementById('weekdays').appendChild(el('div', 'weekday', day));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setView(button.dataset.view));
    });

    moodButtons.forEach((button) => {
      button.addEventListener('click', () => setMood(button.dataset.mood));
    });

    document.getElementById('new-btn').addEventListener('click', () => {
      setView('timeline');
      editorEl.classList.toggle('hidden');
      renderTimeline();
    });

    document.getElementById('prev-month').addEventListener('click', () => {
      loadCalendar(app.month && app.month.previous).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('next-month').addEventListener('click', () => {
      loadCalendar(app.month && app.month.next).catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('notify-btn').addEventListener('click', () => {
      requestPermission()
        .then((permission) => setStatus(`Reminders: ${permission}`, 'info'))
        .catch((err) => setStatus(err.message, 'error'));
    });

    photoEl.addEventListener('change', () => {
      const file = photoEl.files[0];
      if (!file) {
        return;
      }
      const reader = new FileReader();
      reader.onloadend = () => {
        app.draft.photo = reader.result;
        previewEl.src = reader.result;
        previewEl.classList.remove('hidden');
      };
      reader.readAsDataURL(file);
    });

    editorEl.addEventListener('submit', (event) => {
      event.preventDefault();
      saveEntry().catch((err) => setStatus(err.message, 'error'));
    });

    loadEntries().catch((err) => setStatus(err.message, 'error'));

    if ('Notification' in window && Notification.permission !== 'default') {
      reportPermission(Notification.permission).catch(() => {});
    }
    pollReminder().catch(() => {});
    setInterval(() => pollReminder().catch(() => {}), REMINDER_POLL_MS);
  </script>
</body>
</html>
"#;
