//! 测试用的结果页样本

pub const FULL_MEMBER_PAGE: &str = r#"<html><body>
<h2>Membership validation status</h2>
<div class="result">
  <div class="row"><div><strong>First and last name initials</strong></div><span>K</span><span>G</span></div>
  <div class="row"><p><strong>Membership status:</strong> Active</p></div>
  <div class="row"><div><strong>IEEE member grade</strong></div><span>Senior Member</span></div>
  <div class="row"><div><strong>Standards Association Member</strong></div><div></div><div>Yes</div></div>
  <div class="row">
    <div><strong>Society memberships</strong></div>
    <ul>
      <li>IEEE Computer Society Membership</li>
      <li>IEEE Communications Society Membership</li>
    </ul>
  </div>
</div>
</body></html>"#;

pub const STATUS_AND_GRADE_PAGE: &str = r#"<html><body>
<h2>Membership validation status</h2>
<div class="result">
  <p><strong>Membership status:</strong> Active</p>
  <p><strong>IEEE member grade:</strong> Senior Member</p>
</div>
</body></html>"#;

pub const NO_RECORD_PAGE: &str = r#"<html><body>
<h2>Membership validation status</h2>
<p>No record matches the number you entered.</p>
</body></html>"#;

pub const LOGIN_PAGE: &str = r#"<html><body><form><label>Username</label><input name="user"></form></body></html>"#;
