//! Coding helper replies. Canned example snippets keyed by language and
//! request kind, picked without randomness so repeated asks stay stable.

/// Recognized language names, longest-prefix first so "javascript"
/// never routes to "java".
const LANGUAGES: &[&str] = &["python", "javascript", "java", "c++", "html"];

fn display_name(language: &str) -> &'static str {
    match language {
        "python" => "Python",
        "javascript" => "Javascript",
        "java" => "Java",
        "c++" => "C++",
        _ => "HTML",
    }
}

/// Answer a coding-flavored message. `lowered` is the lowercased text.
pub(crate) fn coding_help(lowered: &str) -> String {
    let language = LANGUAGES.iter().find(|l| lowered.contains(*l)).copied();

    if lowered.contains("function") {
        function_example(language)
    } else if lowered.contains("loop") {
        loop_example(language)
    } else if lowered.contains("class") {
        class_example(language)
    } else if lowered.contains("hello world") {
        hello_world(language)
    } else {
        CAPABILITY_SUMMARY.to_string()
    }
}

const CAPABILITY_SUMMARY: &str = "I love talking about code! I can show you functions, loops, \
classes, and Hello World examples in Python, JavaScript, Java, C++, and HTML. What would you \
like to see?";

fn function_example(language: Option<&str>) -> String {
    match language {
        Some("python") => PYTHON_FUNCTION.to_string(),
        Some("javascript") => JAVASCRIPT_FUNCTION.to_string(),
        _ => "I can help you write functions! Which programming language are you working \
              with? I can provide examples in Python, JavaScript, Java, C++, and more. What \
              specific type of function do you need help with?"
            .to_string(),
    }
}

fn loop_example(language: Option<&str>) -> String {
    match language {
        Some("python") => PYTHON_LOOPS.to_string(),
        Some("javascript") => JAVASCRIPT_LOOPS.to_string(),
        _ => "I can show you loop examples! Which programming language are you using? I \
              have examples for Python, JavaScript, Java, C++, and more. What type of loop \
              are you trying to create?"
            .to_string(),
    }
}

fn class_example(language: Option<&str>) -> String {
    match language {
        Some("python") => PYTHON_CLASS.to_string(),
        Some("javascript") => JAVASCRIPT_CLASS.to_string(),
        _ => "I can help you create classes! Which programming language are you working \
              with? I can show examples in Python, JavaScript, Java, C++, and more. What \
              kind of class are you trying to build?"
            .to_string(),
    }
}

fn hello_world(language: Option<&str>) -> String {
    let snippet = match language {
        Some("python") => Some(HELLO_PYTHON),
        Some("javascript") => Some(HELLO_JAVASCRIPT),
        Some("java") => Some(HELLO_JAVA),
        Some("c++") => Some(HELLO_CPP),
        Some("html") => Some(HELLO_HTML),
        _ => None,
    };
    match (language, snippet) {
        (Some(language), Some(snippet)) => format!(
            "Here's Hello World in {}:\n\n{}\n\nThis is the classic first program! Want to \
             see it in other languages or learn what comes next?",
            display_name(language),
            snippet,
        ),
        _ => HELLO_SAMPLER.to_string(),
    }
}

const PYTHON_FUNCTION: &str = r##"Here's a Python function example:

```python
def calculate_factorial(n):
    """Calculate factorial of a number"""
    if n <= 1:
        return 1
    return n * calculate_factorial(n - 1)

# Usage
result = calculate_factorial(5)
print(f"5! = {result}")  # Output: 5! = 120
```

This function uses recursion to calculate factorials. Want to see examples in other languages or different types of functions?"##;

const JAVASCRIPT_FUNCTION: &str = r##"Here's a JavaScript function example:

```javascript
function greetUser(name, time = 'day') {
    return `Hello ${name}, have a great ${time}!`;
}

// Usage
console.log(greetUser('Alice'));         // "Hello Alice, have a great day!"
console.log(greetUser('Bob', 'evening')); // "Hello Bob, have a great evening!"
```

This shows function parameters with default values. Need help with arrow functions or async functions?"##;

const PYTHON_LOOPS: &str = r##"Here are Python loop examples:

```python
# For loop with range
for i in range(5):
    print(f"Count: {i}")

# For loop with list
fruits = ['apple', 'banana', 'orange']
for fruit in fruits:
    print(f"I like {fruit}")

# While loop
count = 0
while count < 3:
    print(f"While loop: {count}")
    count += 1

# List comprehension (Pythonic way)
squares = [x**2 for x in range(5)]
print(squares)  # [0, 1, 4, 9, 16]
```

Python loops are very readable and powerful! Need help with specific loop scenarios?"##;

const JAVASCRIPT_LOOPS: &str = r##"Here are JavaScript loop examples:

```javascript
// For loop
for (let i = 0; i < 5; i++) {
    console.log(`Count: ${i}`);
}

// For...of loop (arrays)
const fruits = ['apple', 'banana', 'orange'];
for (const fruit of fruits) {
    console.log(`I like ${fruit}`);
}

// For...in loop (objects)
const person = {name: 'Alice', age: 30, city: 'New York'};
for (const key in person) {
    console.log(`${key}: ${person[key]}`);
}

// Array methods (functional approach)
const numbers = [1, 2, 3, 4, 5];
numbers.forEach(num => console.log(num * 2));
```

JavaScript offers many ways to iterate! Want to learn about map, filter, or reduce?"##;

const PYTHON_CLASS: &str = r##"Here's a Python class example:

```python
class Dog:
    def __init__(self, name, breed, age):
        self.name = name
        self.breed = breed
        self.age = age
        self.energy = 100

    def bark(self):
        print(f"{self.name} says Woof!")
        return "Woof!"

    def play(self):
        if self.energy > 20:
            self.energy -= 20
            print(f"{self.name} is playing! Energy: {self.energy}")
        else:
            print(f"{self.name} is too tired to play.")

    def __str__(self):
        return f"{self.name} is a {self.age}-year-old {self.breed}"

# Usage
my_dog = Dog("Buddy", "Golden Retriever", 3)
print(my_dog)  # "Buddy is a 3-year-old Golden Retriever"
my_dog.bark()  # "Buddy says Woof!"
my_dog.play()  # "Buddy is playing! Energy: 80"
```

This shows constructor, methods, and string representation. Want to learn about inheritance or properties?"##;

const JAVASCRIPT_CLASS: &str = r##"Here's a JavaScript class example:

```javascript
class Car {
    constructor(make, model, year) {
        this.make = make;
        this.model = model;
        this.year = year;
        this.mileage = 0;
    }

    start() {
        console.log(`${this.make} ${this.model} is starting...`);
        return 'Engine started!';
    }

    drive(miles) {
        this.mileage += miles;
        console.log(`Drove ${miles} miles. Total: ${this.mileage}`);
    }

    getInfo() {
        return `${this.year} ${this.make} ${this.model} - ${this.mileage} miles`;
    }
}

// Usage
const myCar = new Car('Toyota', 'Camry', 2022);
console.log(myCar.getInfo()); // "2022 Toyota Camry - 0 miles"
myCar.start();                // "Toyota Camry is starting..."
myCar.drive(150);             // "Drove 150 miles. Total: 150"
```

This shows ES6 class syntax with constructor and methods. Need help with inheritance or static methods?"##;

const HELLO_PYTHON: &str = r##"```python
print("Hello, World!")

# Or with a function
def greet():
    return "Hello, World!"

print(greet())
```"##;

const HELLO_JAVASCRIPT: &str = r##"```javascript
console.log("Hello, World!");

// Or with a function
function greet() {
    return "Hello, World!";
}

console.log(greet());

// Or as an arrow function
const greetArrow = () => "Hello, World!";
console.log(greetArrow());
```"##;

const HELLO_JAVA: &str = r##"```java
public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
```"##;

const HELLO_CPP: &str = r##"```cpp
#include <iostream>
using namespace std;

int main() {
    cout << "Hello, World!" << endl;
    return 0;
}
```"##;

const HELLO_HTML: &str = r##"```html
<!DOCTYPE html>
<html>
<head>
    <title>Hello World</title>
</head>
<body>
    <h1>Hello, World!</h1>
</body>
</html>
```"##;

const HELLO_SAMPLER: &str = r##"Here's Hello World in several popular languages:

**Python:**
```python
print("Hello, World!")
```

**JavaScript:**
```javascript
console.log("Hello, World!");
```

**Java:**
```java
public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
```

Which language are you starting with? I can walk you through any of these!"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn javascript_is_not_mistaken_for_java() {
        let reply = coding_help("show me a javascript function");
        assert!(reply.contains("JavaScript function example"));
        assert!(reply.contains("greetUser"));
    }

    #[test]
    fn java_still_routes_to_java() {
        let reply = coding_help("hello world in java please");
        assert!(reply.contains("Hello World in Java"));
        assert!(reply.contains("System.out.println"));
    }

    #[test]
    fn request_kind_picks_the_snippet_family() {
        assert!(coding_help("python loop help").contains("Python loop examples"));
        assert!(coding_help("write a python class").contains("class Dog"));
        assert!(coding_help("python function please").contains("calculate_factorial"));
    }

    #[test]
    fn unknown_language_asks_which_one() {
        let reply = coding_help("can you write a function for me");
        assert!(reply.contains("Which programming language"));
    }

    #[test]
    fn bare_coding_talk_gets_the_capability_summary() {
        let reply = coding_help("i like to code");
        assert!(reply.contains("functions, loops"));
    }

    #[test]
    fn hello_world_without_language_samples_several() {
        let reply = coding_help("show me hello world");
        assert!(reply.contains("several popular languages"));
        assert!(reply.contains("print(\"Hello, World!\")"));
        assert!(reply.contains("console.log"));
    }
}
